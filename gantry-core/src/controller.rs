//! Controller invocation.
//!
//! Bridges resolved route handlers to stateful controller objects: the
//! adapter injects the ambient request/response pair, runs the controller's
//! initialization hook, and short-circuits when the hook already produced a
//! response. Otherwise the target action runs, falling back to the
//! controller's current response when the action returns no explicit one.

use crate::{Error, HttpRequest, HttpResponse};
use async_trait::async_trait;
use std::future::Future;

/// Outcome of a controller's `initialize` hook.
#[derive(Debug)]
pub enum InitOutcome {
    /// Proceed to the target action.
    Continue,
    /// Stop and respond with the controller's current response.
    Handled,
    /// Stop and respond with this response.
    Response(HttpResponse),
}

/// A stateful controller that receives the ambient request/response pair
/// before its action runs.
///
/// One controller instance serves one request; the invocation adapter owns
/// it for the duration of the call.
#[async_trait]
pub trait Controller: Send {
    /// Inject the inbound request.
    fn set_request(&mut self, request: HttpRequest);

    /// Inject the ambient response the controller may mutate.
    fn set_response(&mut self, response: HttpResponse);

    /// Take the controller's current response.
    fn take_response(&mut self) -> HttpResponse;

    /// Initialization hook, run before the target action.
    ///
    /// The default proceeds to the action. Implementations short-circuit
    /// by returning [`InitOutcome::Handled`] (use the controller's current
    /// response, e.g. a redirect set up during initialization) or
    /// [`InitOutcome::Response`].
    async fn initialize(&mut self) -> Result<InitOutcome, Error> {
        Ok(InitOutcome::Continue)
    }
}

/// Invoke a controller action with the ambient request/response pair.
///
/// Runs in order: request/response injection, the `initialize` hook
/// (short-circuiting per [`InitOutcome`]), then the action itself. The
/// action takes the controller by value and hands it back alongside an
/// optional explicit response; `None` falls back to the controller's
/// current response.
///
/// # Examples
///
/// ```ignore
/// let response = invoke(
///     controller,
///     |mut c| async move {
///         let explicit = c.show_profile().await?;
///         Ok((c, explicit))
///     },
///     request,
///     HttpResponse::ok(),
/// )
/// .await?;
/// ```
pub async fn invoke<C, F, Fut>(
    mut controller: C,
    action: F,
    request: HttpRequest,
    response: HttpResponse,
) -> Result<HttpResponse, Error>
where
    C: Controller,
    F: FnOnce(C) -> Fut,
    Fut: Future<Output = Result<(C, Option<HttpResponse>), Error>>,
{
    controller.set_request(request);
    controller.set_response(response);

    match controller.initialize().await? {
        InitOutcome::Handled => return Ok(controller.take_response()),
        InitOutcome::Response(response) => return Ok(response),
        InitOutcome::Continue => {}
    }

    let (mut controller, explicit) = action(controller).await?;
    match explicit {
        Some(response) => Ok(response),
        None => Ok(controller.take_response()),
    }
}
