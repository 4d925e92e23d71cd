mod probe;

pub use probe::{DnsConnectivityProbe, HttpContentProbe};
