pub mod httpclient;
pub mod sources;
