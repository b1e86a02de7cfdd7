pub const REST_API: &str = "https://api.twitter.com/1.1";
pub const USER_AGENT: &str = "roost-timeline-proxy/0.1";

// Vendor error codes, per the API error index.
pub const COULD_NOT_AUTHENTICATE: u32 = 32;
pub const PAGE_DOES_NOT_EXIST: u32 = 34;
pub const USER_NOT_FOUND: u32 = 50;
pub const RATE_LIMIT_EXCEEDED: u32 = 88;
pub const INVALID_OR_EXPIRED_TOKEN: u32 = 89;
