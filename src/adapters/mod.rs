// Adapters layer: concrete implementations of the domain ports (http, local downloads).

pub mod http;
pub mod storage;
