//! Tenant Resolution
//!
//! Finds the tenant slug a request is addressed to. Resolution never rejects anything: a
//! request with no slug simply resolves to `None` and the validator decides whether the
//! route can live without one.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Header carrying the tenant slug.
pub const TENANT_SLUG_HEADER: &str = "x-tenant-slug";

/// Route parameter carrying the tenant slug (`/tenants/{tenant_slug}/...`).
pub const TENANT_SLUG_PATH_PARAM: &str = "tenant_slug";

/// Query parameter carrying the tenant slug (`?tenantSlug=...`).
pub const TENANT_SLUG_QUERY_PARAM: &str = "tenantSlug";

/// Read access to the parts of a request that may name a tenant.
pub trait TenantSource {
    /// Header value by (case-insensitive) name.
    fn header(&self, name: &str) -> Option<&str>;

    /// Matched route parameter by name.
    fn path_param(&self, name: &str) -> Option<&str>;

    /// Query string parameter by name.
    fn query_param(&self, name: &str) -> Option<&str>;
}

/// Where a candidate slug was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlugSource {
    /// `x-tenant-slug` header.
    Header,

    /// `{tenant_slug}` route segment.
    Path,

    /// `tenantSlug` query parameter.
    Query,
}

impl SlugSource {
    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Path => "path",
            Self::Query => "query",
        }
    }
}

impl Display for SlugSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// An unvalidated slug taken from a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantCandidate {
    /// Where the slug came from.
    pub source: SlugSource,

    /// Trimmed slug text, not yet validated.
    pub slug: String,
}

/// Pick the candidate tenant slug for a request.
///
/// Header beats path, path beats query. Blank values are skipped so that an empty header
/// does not shadow a populated path segment.
pub fn resolve_tenant<S>(source: &S) -> Option<TenantCandidate>
where
    S: TenantSource + ?Sized,
{
    [
        (SlugSource::Header, source.header(TENANT_SLUG_HEADER)),
        (SlugSource::Path, source.path_param(TENANT_SLUG_PATH_PARAM)),
        (SlugSource::Query, source.query_param(TENANT_SLUG_QUERY_PARAM)),
    ]
    .into_iter()
    .find_map(|(origin, value)| {
        let value = value?.trim();

        (!value.is_empty()).then(|| TenantCandidate {
            source: origin,
            slug: value.to_owned(),
        })
    })
}
