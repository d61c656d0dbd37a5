// Domain layer: the locator, fetch report and the ports fetchers and storage plug into.

pub mod model;
pub mod ports;
