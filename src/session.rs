//! Access decisions for pages behind login.
//!
//! The authentication layer in front of the router resolves the caller and
//! inserts a [`Session`] into the request extensions. Handlers never look the
//! session up themselves: they receive it through the [`ClinicAccess`] or
//! [`SessionAccess`] extractors, which run the pure [`gate`] decision.

use axum::{extract::FromRequestParts, http::request::Parts, response::Redirect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicRef {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub clinic: Option<ClinicRef>,
    pub plan: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
}

/// Where a gated request gets sent instead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    Login,
    ClinicSetup,
    Subscription,
}

impl RedirectTarget {
    pub fn path(self) -> &'static str {
        match self {
            RedirectTarget::Login => "/authentication",
            RedirectTarget::ClinicSetup => "/clinic-form",
            RedirectTarget::Subscription => "/new-subscription",
        }
    }
}

/// What an authenticated user with a clinic and a plan may act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicContext {
    pub user_id: Uuid,
    pub clinic: ClinicRef,
    pub plan: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    Allow(ClinicContext),
    Redirect(RedirectTarget),
}

/// Login first, then clinic setup, then subscription
pub fn gate(session: Option<&Session>) -> Gate {
    let Some(session) = session else {
        return Gate::Redirect(RedirectTarget::Login);
    };
    let Some(clinic) = &session.user.clinic else {
        return Gate::Redirect(RedirectTarget::ClinicSetup);
    };
    let Some(plan) = &session.user.plan else {
        return Gate::Redirect(RedirectTarget::Subscription);
    };

    Gate::Allow(ClinicContext {
        user_id: session.user.id,
        clinic: clinic.clone(),
        plan: plan.clone(),
    })
}

/// Extractor for pages that need a clinic and an active plan
#[derive(Debug, Clone)]
pub struct ClinicAccess(pub ClinicContext);

impl<S: Send + Sync> FromRequestParts<S> for ClinicAccess {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match gate(parts.extensions.get::<Session>()) {
            Gate::Allow(context) => Ok(ClinicAccess(context)),
            Gate::Redirect(target) => {
                tracing::debug!(target = target.path(), "Gated request redirected");
                Err(Redirect::to(target.path()))
            }
        }
    }
}

/// Extractor for pages that only need a logged-in user (clinic setup)
#[derive(Debug, Clone)]
pub struct SessionAccess(pub Session);

impl<S: Send + Sync> FromRequestParts<S> for SessionAccess {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(SessionAccess)
            .ok_or_else(|| Redirect::to(RedirectTarget::Login.path()))
    }
}
