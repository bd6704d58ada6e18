// Constants of the GeneDock authorization scheme.
pub const GD_HEADER_PREFIX: &str = "x-gd-";
pub const AUTH_SCHEME: &str = "GeneDock";
pub const ALGORITHM_HMAC_SHA1_V1: &str = "hmac-sha1-v1";

pub const CONTENT_MD5: &str = "content-md5";

// Defaults applied when expanding URL shorthand.
pub const DEFAULT_SCHEME: &str = "http";
pub const DEFAULT_HOST: &str = "localhost";
