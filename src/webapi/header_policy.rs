//! Pure decoding of the two headers that steer the async boundary
//! middleware. Reads only the header map; never touches the body.

use std::time::Duration;

use http::HeaderMap;
use tracing::warn;

pub const DEFAULT_TTL: Duration = Duration::from_millis(100);

const BACKGROUND_HEADER: &str = "x-background";
const BACKGROUND_TTL_HEADER: &str = "x-background-ttl";

/// The outcome of inspecting a request's headers: either pass straight
/// through, or go async with a resolved deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Sync,
    Async { ttl: Duration },
}

/// `x-background` enables async mode when its first value is present and
/// non-empty. `x-background-ttl` is parsed only in that case; a missing or
/// unparsable value falls back to [`DEFAULT_TTL`] with a warning.
pub fn resolve(headers: &HeaderMap) -> Mode {
    let enabled = headers
        .get(BACKGROUND_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| !v.is_empty());

    if !enabled {
        return Mode::Sync;
    }

    let ttl = headers
        .get(BACKGROUND_TTL_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|raw| match humantime::parse_duration(raw) {
            Ok(d) => Some(d),
            Err(err) => {
                warn!(raw, error = %err, "x-background-ttl did not parse, using default");
                None
            }
        })
        .unwrap_or(DEFAULT_TTL);

    Mode::Async { ttl }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.append(
                http::HeaderName::from_bytes(k.as_bytes()).unwrap(),
                HeaderValue::from_str(v).unwrap(),
            );
        }
        map
    }

    #[test]
    fn absent_header_is_sync() {
        assert_eq!(resolve(&headers(&[])), Mode::Sync);
    }

    #[test]
    fn empty_value_is_sync() {
        assert_eq!(resolve(&headers(&[("x-background", "")])), Mode::Sync);
    }

    #[test]
    fn present_value_is_async_with_default_ttl() {
        assert_eq!(
            resolve(&headers(&[("x-background", "true")])),
            Mode::Async { ttl: DEFAULT_TTL }
        );
    }

    #[test]
    fn custom_ttl_is_parsed() {
        let mode = resolve(&headers(&[("x-background", "true"), ("x-background-ttl", "50ms")]));
        assert_eq!(mode, Mode::Async { ttl: Duration::from_millis(50) });
    }

    #[test]
    fn unparsable_ttl_falls_back_to_default() {
        let mode = resolve(&headers(&[("x-background", "true"), ("x-background-ttl", "nonsense")]));
        assert_eq!(mode, Mode::Async { ttl: DEFAULT_TTL });
    }
}
