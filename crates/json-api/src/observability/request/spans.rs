//! Route templates for span names and metric labels.
//!
//! Raw paths carry UUIDs and tenant slugs. Both are replaced with placeholders so
//! span names and metric labels stay low-cardinality.

use uuid::Uuid;

pub(super) fn route_template(path: &str) -> String {
    let mut template = String::new();
    let mut previous = "";

    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        template.push('/');

        if previous == "tenants" {
            template.push_str("{tenant_slug}");
        } else if Uuid::parse_str(segment).is_ok() {
            template.push_str("{uuid}");
        } else {
            template.push_str(segment);
        }

        previous = segment;
    }

    if template.is_empty() {
        template.push('/');
    }

    template
}
