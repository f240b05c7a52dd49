pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_query_params, parse_request, ParsedRequest};
pub use response::{
    write_enforcement_error, write_handler_response, write_json_error, HandlerResponse,
};
pub use service::ContractService;
