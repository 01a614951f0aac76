//! Call-site kind selection.
//!
//! Every call expression gets exactly one call-site object, chosen here once and
//! cached by the caller. This module only decides *which kind* of call site to
//! build; the call sites themselves live behind [`CallSiteFactory`].

mod fast_ops;

use mindex_core::config::DispatchConfig;
use mindex_core::trace;
use std::fmt::{Display, Formatter};

pub use fast_ops::{
    all_specs as fast_op_specs, fast_float_call_site, fast_float_op_method,
    fast_integer_call_site, fast_integer_op_method, fast_op_call_site, fast_op_method_name,
    has_fast_float_op, has_fast_integer_op, has_fast_op, lookup_spec as lookup_fast_op, FastOp,
    FastOpSpec, NumericKind,
};

pub const RESPOND_TO: &str = "respond_to?";

/// Tag naming the call-site implementation that mediates a call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CallSiteKind {
    /// Generic polymorphic caching call site.
    Normal(String),
    /// Receiver-less call, e.g. `puts x`.
    Functional(String),
    /// Bare identifier that may turn out to be a method call.
    Variable(String),
    Super,
    RespondTo,
    FastOp(FastOp),
}

impl CallSiteKind {
    /// The method name the call site dispatches, if it carries one.
    pub fn method_name(&self) -> Option<&str> {
        match self {
            CallSiteKind::Normal(name)
            | CallSiteKind::Functional(name)
            | CallSiteKind::Variable(name) => Some(name),
            CallSiteKind::RespondTo => Some(RESPOND_TO),
            CallSiteKind::FastOp(op) => Some(op.symbol()),
            CallSiteKind::Super => None,
        }
    }

    pub fn is_fast_path(&self) -> bool {
        matches!(self, CallSiteKind::FastOp(_))
    }
}

impl Display for CallSiteKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CallSiteKind::Normal(name) => write!(f, "normal({name})"),
            CallSiteKind::Functional(name) => write!(f, "functional({name})"),
            CallSiteKind::Variable(name) => write!(f, "variable({name})"),
            CallSiteKind::Super => write!(f, "super"),
            CallSiteKind::RespondTo => write!(f, "respond_to"),
            CallSiteKind::FastOp(op) => {
                let label: &'static str = (*op).into();
                write!(f, "fast({label})")
            }
        }
    }
}

/// Builds concrete call sites for a selected kind.
pub trait CallSiteFactory {
    type CallSite;

    fn construct(&self, kind: CallSiteKind) -> Self::CallSite;
}

/// Chooses the call-site kind for a call to `name` with an explicit receiver.
pub fn select_call_site(name: &str, config: &DispatchConfig) -> CallSiteKind {
    let kind = if name == RESPOND_TO {
        CallSiteKind::RespondTo
    } else if config.fast_ops_active() {
        fast_integer_call_site(name)
    } else {
        CallSiteKind::Normal(name.to_string())
    };
    trace!(method = name, %kind, "selected call site");
    kind
}

/// [`select_call_site`] against the process-wide configuration.
pub fn call_site(name: &str) -> CallSiteKind {
    select_call_site(name, mindex_core::config::global())
}

pub fn functional_call_site(name: &str) -> CallSiteKind {
    CallSiteKind::Functional(name.to_string())
}

pub fn variable_call_site(name: &str) -> CallSiteKind {
    CallSiteKind::Variable(name.to_string())
}

pub fn super_call_site() -> CallSiteKind {
    CallSiteKind::Super
}

pub fn instantiate_call_site<F: CallSiteFactory>(
    factory: &F,
    name: &str,
    config: &DispatchConfig,
) -> F::CallSite {
    factory.construct(select_call_site(name, config))
}

pub fn instantiate_functional<F: CallSiteFactory>(factory: &F, name: &str) -> F::CallSite {
    factory.construct(functional_call_site(name))
}

pub fn instantiate_variable<F: CallSiteFactory>(factory: &F, name: &str) -> F::CallSite {
    factory.construct(variable_call_site(name))
}

pub fn instantiate_super<F: CallSiteFactory>(factory: &F) -> F::CallSite {
    factory.construct(super_call_site())
}
