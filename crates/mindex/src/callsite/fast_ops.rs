use super::CallSiteKind;
use mindex_core::Error;
use std::collections::HashMap;
use std::sync::LazyLock;
use strum_macros::{EnumIter, IntoStaticStr};

/// Operators that have a dedicated call-site implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum FastOp {
    Plus,
    Minus,
    Mul,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Cmp,
    BitAnd,
    BitOr,
    Xor,
    ShiftLeft,
    ShiftRight,
}

impl FastOp {
    pub fn symbol(self) -> &'static str {
        match self {
            FastOp::Plus => "+",
            FastOp::Minus => "-",
            FastOp::Mul => "*",
            FastOp::Lt => "<",
            FastOp::Le => "<=",
            FastOp::Gt => ">",
            FastOp::Ge => ">=",
            FastOp::Eq => "==",
            FastOp::Cmp => "<=>",
            FastOp::BitAnd => "&",
            FastOp::BitOr => "|",
            FastOp::Xor => "^",
            FastOp::ShiftLeft => "<<",
            FastOp::ShiftRight => ">>",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+" => FastOp::Plus,
            "-" => FastOp::Minus,
            "*" => FastOp::Mul,
            "<" => FastOp::Lt,
            "<=" => FastOp::Le,
            ">" => FastOp::Gt,
            ">=" => FastOp::Ge,
            "==" => FastOp::Eq,
            "<=>" => FastOp::Cmp,
            "&" => FastOp::BitAnd,
            "|" => FastOp::BitOr,
            "^" => FastOp::Xor,
            "<<" => FastOp::ShiftLeft,
            ">>" => FastOp::ShiftRight,
            _ => return None,
        };
        Some(op)
    }

    pub fn parse_symbol(symbol: &str) -> mindex_core::Result<Self> {
        Self::from_symbol(symbol).ok_or_else(|| Error::UnknownOperator(symbol.to_string()))
    }

    pub fn is_bitwise(self) -> bool {
        matches!(
            self,
            FastOp::BitAnd | FastOp::BitOr | FastOp::Xor | FastOp::ShiftLeft | FastOp::ShiftRight
        )
    }
}

/// The two primitive numeric kinds with fast operator paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    /// Fixed-width integers.
    Integer,
    Float,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastOpSpec {
    pub op: FastOp,
    /// Name of the primitive method the operator maps to.
    pub method: &'static str,
}

const fn spec(op: FastOp, method: &'static str) -> FastOpSpec {
    FastOpSpec { op, method }
}

const INTEGER_OPS: &[FastOpSpec] = &[
    spec(FastOp::Plus, "op_plus"),
    spec(FastOp::Minus, "op_minus"),
    spec(FastOp::Mul, "op_mul"),
    spec(FastOp::Eq, "op_equal"),
    spec(FastOp::Lt, "op_lt"),
    spec(FastOp::Le, "op_le"),
    spec(FastOp::Gt, "op_gt"),
    spec(FastOp::Ge, "op_ge"),
    spec(FastOp::Cmp, "op_cmp"),
    spec(FastOp::BitAnd, "op_and"),
    spec(FastOp::BitOr, "op_or"),
    spec(FastOp::Xor, "op_xor"),
    spec(FastOp::ShiftRight, "op_rshift"),
    spec(FastOp::ShiftLeft, "op_lshift"),
];

// Floats have no bitwise or shift primitives.
const FLOAT_OPS: &[FastOpSpec] = &[
    spec(FastOp::Plus, "op_plus"),
    spec(FastOp::Minus, "op_minus"),
    spec(FastOp::Mul, "op_mul"),
    spec(FastOp::Eq, "op_equal"),
    spec(FastOp::Lt, "op_lt"),
    spec(FastOp::Le, "op_le"),
    spec(FastOp::Gt, "op_gt"),
    spec(FastOp::Ge, "op_ge"),
    spec(FastOp::Cmp, "op_cmp"),
];

type FastOpTable = HashMap<&'static str, &'static FastOpSpec>;

fn build_table(specs: &'static [FastOpSpec]) -> FastOpTable {
    let mut map = HashMap::with_capacity(specs.len());
    for spec in specs {
        map.insert(spec.op.symbol(), spec);
    }
    map
}

static INTEGER_TABLE: LazyLock<FastOpTable> = LazyLock::new(|| build_table(INTEGER_OPS));
static FLOAT_TABLE: LazyLock<FastOpTable> = LazyLock::new(|| build_table(FLOAT_OPS));

fn table(kind: NumericKind) -> &'static FastOpTable {
    match kind {
        NumericKind::Integer => &INTEGER_TABLE,
        NumericKind::Float => &FLOAT_TABLE,
    }
}

pub fn all_specs(kind: NumericKind) -> &'static [FastOpSpec] {
    match kind {
        NumericKind::Integer => INTEGER_OPS,
        NumericKind::Float => FLOAT_OPS,
    }
}

pub fn lookup_spec(kind: NumericKind, symbol: &str) -> Option<&'static FastOpSpec> {
    table(kind).get(symbol).copied()
}

pub fn has_fast_op(kind: NumericKind, symbol: &str) -> bool {
    table(kind).contains_key(symbol)
}

/// Primitive method name for `symbol`, `None` when [`has_fast_op`] is false.
pub fn fast_op_method_name(kind: NumericKind, symbol: &str) -> Option<&'static str> {
    lookup_spec(kind, symbol).map(|spec| spec.method)
}

pub fn has_fast_integer_op(symbol: &str) -> bool {
    has_fast_op(NumericKind::Integer, symbol)
}

pub fn fast_integer_op_method(symbol: &str) -> Option<&'static str> {
    fast_op_method_name(NumericKind::Integer, symbol)
}

pub fn has_fast_float_op(symbol: &str) -> bool {
    has_fast_op(NumericKind::Float, symbol)
}

pub fn fast_float_op_method(symbol: &str) -> Option<&'static str> {
    fast_op_method_name(NumericKind::Float, symbol)
}

/// Total: any name without a fast path for `kind` gets a normal call site.
pub fn fast_op_call_site(kind: NumericKind, name: &str) -> CallSiteKind {
    match lookup_spec(kind, name) {
        Some(spec) => CallSiteKind::FastOp(spec.op),
        None => CallSiteKind::Normal(name.to_string()),
    }
}

pub fn fast_integer_call_site(name: &str) -> CallSiteKind {
    fast_op_call_site(NumericKind::Integer, name)
}

pub fn fast_float_call_site(name: &str) -> CallSiteKind {
    fast_op_call_site(NumericKind::Float, name)
}
