//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};

use crate::{errors::ApiError, extensions::*, state::State};

/// Resolve the bearer token into a [`Caller`](refill_app::auth::Caller) and
/// inject it into the depot for the handlers below.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(ApiError::unauthorized(
            "missing or invalid Authorization header",
        ));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    let caller = match state.app.auth.authenticate_bearer(token).await {
        Ok(caller) => caller,
        Err(error) => {
            res.render(ApiError::from_service(error.kind(), &error));
            ctrl.skip_rest();

            return;
        }
    };

    tracing::Span::current().record("caller_uuid", tracing::field::display(caller.uuid));

    depot.inject(caller);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
