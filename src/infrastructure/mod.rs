// Infrastructure layer - External formats, configuration and HTTP adapters
pub mod config;
pub mod delimited_reader;
pub mod headers;
pub mod http_response;
pub mod spreadsheet_reader;
