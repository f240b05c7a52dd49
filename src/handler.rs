use crate::server::{HandlerResponse, ParsedRequest};

/// The handler a [`ContractService`](crate::server::ContractService) wraps.
///
/// Handlers own the response entirely: status, headers and body. They run
/// only after request-side validation has passed, and their output is
/// checked against the contract before it reaches the wire. Closures with
/// the matching signature implement this automatically.
pub trait ContractHandler: Send + Sync + 'static {
    fn handle(&self, req: &ParsedRequest) -> anyhow::Result<HandlerResponse>;
}

impl<F> ContractHandler for F
where
    F: Fn(&ParsedRequest) -> anyhow::Result<HandlerResponse> + Send + Sync + 'static,
{
    fn handle(&self, req: &ParsedRequest) -> anyhow::Result<HandlerResponse> {
        self(req)
    }
}
