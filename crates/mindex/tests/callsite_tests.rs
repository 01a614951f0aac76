use mindex::callsite::{
    fast_float_call_site, fast_float_op_method, fast_integer_call_site, fast_integer_op_method,
    fast_op_method_name, fast_op_specs, has_fast_float_op, has_fast_integer_op, has_fast_op,
    instantiate_call_site, instantiate_functional, instantiate_super, instantiate_variable,
    RESPOND_TO,
};
use mindex::{
    functional_call_site, select_call_site, super_call_site, variable_call_site, CallSiteFactory,
    CallSiteKind, DispatchConfig, FastOp, MethodIndex, NumericKind,
};
use pretty_assertions::assert_eq;
use std::cell::RefCell;

const INTEGER_SYMBOLS: &[&str] = &[
    "+", "-", "*", "==", "<", "<=", ">", ">=", "<=>", "&", "|", "^", ">>", "<<",
];

const BITWISE_SYMBOLS: &[&str] = &["&", "|", "^", ">>", "<<"];

fn all_configs() -> Vec<DispatchConfig> {
    vec![
        DispatchConfig::new(true, false),
        DispatchConfig::new(true, true),
        DispatchConfig::new(false, false),
        DispatchConfig::new(false, true),
    ]
}

#[test]
fn respond_to_is_selected_regardless_of_config() {
    for config in all_configs() {
        assert_eq!(select_call_site(RESPOND_TO, &config), CallSiteKind::RespondTo);
    }
}

#[test]
fn disabled_fast_ops_or_tracing_always_select_normal() {
    let configs = [
        DispatchConfig::new(false, false),
        DispatchConfig::new(false, true),
        DispatchConfig::new(true, true),
    ];
    for config in configs {
        for name in INTEGER_SYMBOLS.iter().chain(["to_s", "each", "%"].iter()) {
            assert_eq!(
                select_call_site(name, &config),
                CallSiteKind::Normal(name.to_string()),
                "{name} under {config:?}"
            );
        }
    }
}

#[test]
fn enabled_fast_ops_select_integer_operator_sites() {
    let config = DispatchConfig::new(true, false);
    assert_eq!(select_call_site("+", &config), CallSiteKind::FastOp(FastOp::Plus));
    assert_eq!(select_call_site("<=>", &config), CallSiteKind::FastOp(FastOp::Cmp));
    assert_eq!(select_call_site(">>", &config), CallSiteKind::FastOp(FastOp::ShiftRight));
    assert_eq!(select_call_site("<<", &config), CallSiteKind::FastOp(FastOp::ShiftLeft));
    assert_eq!(select_call_site("%", &config), CallSiteKind::Normal("%".to_string()));
    assert_eq!(select_call_site("upcase", &config), CallSiteKind::Normal("upcase".to_string()));
}

#[test]
fn integer_table_has_every_listed_operator() {
    for symbol in INTEGER_SYMBOLS {
        assert!(has_fast_integer_op(symbol), "{symbol}");
        assert!(fast_integer_call_site(symbol).is_fast_path(), "{symbol}");
    }
    assert_eq!(fast_op_specs(NumericKind::Integer).len(), INTEGER_SYMBOLS.len());
    assert!(!has_fast_integer_op("%"));
    assert!(!has_fast_integer_op("!="));
    assert_eq!(fast_integer_op_method("%"), None);
}

#[test]
fn float_table_excludes_bitwise_and_shift() {
    for symbol in BITWISE_SYMBOLS {
        assert!(has_fast_integer_op(symbol));
        assert!(!has_fast_float_op(symbol), "{symbol}");
        assert_eq!(fast_float_call_site(symbol), CallSiteKind::Normal(symbol.to_string()));
    }
    assert_eq!(fast_op_specs(NumericKind::Float).len(), 9);
    assert_eq!(fast_float_call_site("*"), CallSiteKind::FastOp(FastOp::Mul));
}

#[test]
fn fast_op_method_names_map_to_primitives() {
    let expected = [
        ("+", "op_plus"),
        ("-", "op_minus"),
        ("*", "op_mul"),
        ("==", "op_equal"),
        ("<", "op_lt"),
        ("<=", "op_le"),
        (">", "op_gt"),
        (">=", "op_ge"),
        ("<=>", "op_cmp"),
        ("&", "op_and"),
        ("|", "op_or"),
        ("^", "op_xor"),
        (">>", "op_rshift"),
        ("<<", "op_lshift"),
    ];
    for (symbol, method) in expected {
        assert_eq!(fast_integer_op_method(symbol), Some(method));
    }
    assert_eq!(fast_float_op_method("<="), Some("op_le"));
    assert_eq!(fast_op_method_name(NumericKind::Float, "^"), None);
    assert!(has_fast_op(NumericKind::Float, "=="));
}

#[test]
fn fixed_kind_factories_ignore_fast_paths() {
    assert_eq!(functional_call_site("+"), CallSiteKind::Functional("+".to_string()));
    assert_eq!(variable_call_site("foo"), CallSiteKind::Variable("foo".to_string()));
    assert_eq!(super_call_site(), CallSiteKind::Super);
}

#[derive(Default)]
struct RecordingFactory {
    built: RefCell<Vec<CallSiteKind>>,
}

impl CallSiteFactory for RecordingFactory {
    type CallSite = usize;

    fn construct(&self, kind: CallSiteKind) -> usize {
        let mut built = self.built.borrow_mut();
        built.push(kind);
        built.len() - 1
    }
}

#[test]
fn factory_receives_selected_kinds() {
    let factory = RecordingFactory::default();
    let config = DispatchConfig::default();

    assert_eq!(instantiate_call_site(&factory, "-", &config), 0);
    assert_eq!(instantiate_functional(&factory, "puts"), 1);
    assert_eq!(instantiate_variable(&factory, "x"), 2);
    assert_eq!(instantiate_super(&factory), 3);

    assert_eq!(
        factory.built.into_inner(),
        vec![
            CallSiteKind::FastOp(FastOp::Minus),
            CallSiteKind::Functional("puts".to_string()),
            CallSiteKind::Variable("x".to_string()),
            CallSiteKind::Super,
        ]
    );
}

#[test]
fn method_index_uses_its_own_config() {
    let tracing = MethodIndex::new(DispatchConfig::new(true, true));
    assert_eq!(tracing.call_site("+"), CallSiteKind::Normal("+".to_string()));
    assert_eq!(tracing.call_site(RESPOND_TO), CallSiteKind::RespondTo);

    let fast = MethodIndex::new(DispatchConfig::new(true, false));
    let factory = RecordingFactory::default();
    fast.instantiate(&factory, "==");
    assert_eq!(factory.built.into_inner(), vec![CallSiteKind::FastOp(FastOp::Eq)]);
}

#[test]
fn global_index_is_shared_and_respects_respond_to() {
    let first = MethodIndex::global();
    let second = MethodIndex::global();
    assert!(std::ptr::eq(first, second));
    assert_eq!(first.call_site(RESPOND_TO), CallSiteKind::RespondTo);
    assert_eq!(mindex::call_site(RESPOND_TO), CallSiteKind::RespondTo);
    assert_eq!(
        mindex::call_site("inspect"),
        CallSiteKind::Normal("inspect".to_string())
    );
}
