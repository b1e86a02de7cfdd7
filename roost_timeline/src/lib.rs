mod quota;
mod timeline;
mod upstream;
mod util;

pub use timeline::{Timeline, TimelineRequest, TimelineService};
pub use upstream::{TwitterUpstream, UpstreamClient};
