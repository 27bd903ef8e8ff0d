//! Request adapter for tenant resolution.

use std::str;

use salvo::Request;
use tessera::tenancy::TenantSource;
use tracing::warn;

/// Stands in for a header value that is not UTF-8, so it fails validation instead of
/// letting a lower-precedence slug through.
const UNDECODABLE_HEADER: &str = "\u{fffd}";

/// Exposes a salvo request to [`tessera::tenancy::resolve_tenant`].
#[derive(Debug)]
pub(super) struct RequestSource<'a>(pub(super) &'a Request);

impl TenantSource for RequestSource<'_> {
    fn header(&self, name: &str) -> Option<&str> {
        let value = self.0.headers().get(name)?;

        match str::from_utf8(value.as_bytes()) {
            Ok(text) => Some(text),
            Err(_) => {
                warn!(header = name, "undecodable tenant header");

                Some(UNDECODABLE_HEADER)
            }
        }
    }

    fn path_param(&self, name: &str) -> Option<&str> {
        self.0.params().get(name).map(String::as_str)
    }

    fn query_param(&self, name: &str) -> Option<&str> {
        self.0.queries().get(name).map(String::as_str)
    }
}
