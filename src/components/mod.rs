pub mod app;
pub mod feed_list;
pub mod pull_indicator;
