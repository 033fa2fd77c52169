//! Scenario graph fixtures

use codegraph_symex::features::flow_graph::{
    BlockId, CallSignature, DataType, Expression, FlowGraph, FlowGraphBuilder, Operation,
    Variable,
};
use codegraph_symex::features::expression_builder::{BoolExpr, IntExpr};

/// A graph plus the blocks a test asks about
pub struct Scenario {
    pub graph: FlowGraph,
    pub targets: Vec<BlockId>,
    pub parameters: Vec<Variable>,
}

impl Scenario {
    pub fn parameter(&self, name: &str) -> &Variable {
        self.parameters
            .iter()
            .find(|p| p.name() == name)
            .unwrap_or_else(|| panic!("no parameter named {}", name))
    }
}

/// Entry -> Exit, target Exit
pub fn entry_to_exit(parameters: Vec<Variable>) -> Scenario {
    let mut builder = FlowGraphBuilder::new(parameters.clone(), vec![]);
    let (entry, exit) = (builder.entry(), builder.exit());
    builder.add_unconditional_edge(entry, exit).unwrap();
    Scenario {
        graph: builder.build(),
        targets: vec![exit],
        parameters,
    }
}

/// ```text
/// b0 = b
/// if (b == 0) b = b + 2
/// if (b != b0) -> T      // target
/// else         -> Exit
/// ```
pub fn scenario_a() -> Scenario {
    let a = Variable::new("a", DataType::i32());
    let b = Variable::new("b", DataType::i32());
    let b0 = Variable::new("b0", DataType::i32());
    let (eb, eb0) = (IntExpr::var(&b), IntExpr::var(&b0));

    let mut builder = FlowGraphBuilder::new(vec![a.clone(), b.clone()], vec![]);
    let copy = builder.add_operation(Operation::assign(&b0, eb.clone().into()));
    let cond = builder.add_operation(Operation::jump(eb.eq(0).into()));
    let inc = builder.add_operation(Operation::assign(&b, (eb.clone() + 2).into()));
    let check = builder.add_operation(Operation::jump(eb.ne(&eb0).into()));
    let target = builder.add_empty_block();
    let (entry, exit) = (builder.entry(), builder.exit());

    builder.add_sequence(&[entry, copy, cond]).unwrap();
    builder.add_branch(cond, inc, check).unwrap();
    builder.add_unconditional_edge(inc, check).unwrap();
    builder.add_branch(check, target, exit).unwrap();
    builder.add_unconditional_edge(target, exit).unwrap();

    Scenario {
        graph: builder.build(),
        targets: vec![target],
        parameters: vec![a, b],
    }
}

/// ```text
/// if (c > 0) x = then_value else x = else_value
/// if (x == 5) -> T       // target
/// ```
pub fn scenario_b(then_value: i64, else_value: i64) -> Scenario {
    let c = Variable::new("c", DataType::i32());
    let x = Variable::new("x", DataType::i32());
    let (ec, ex) = (IntExpr::var(&c), IntExpr::var(&x));

    let mut builder = FlowGraphBuilder::new(vec![c.clone()], vec![]);
    let cond = builder.add_operation(Operation::jump(ec.gt(0).into()));
    let then = builder.add_operation(Operation::assign(&x, ex.literal(then_value).into()));
    let other = builder.add_operation(Operation::assign(&x, ex.literal(else_value).into()));
    let join = builder.add_operation(Operation::jump(ex.eq(5).into()));
    let target = builder.add_empty_block();
    let (entry, exit) = (builder.entry(), builder.exit());

    builder.add_unconditional_edge(entry, cond).unwrap();
    builder.add_branch(cond, then, other).unwrap();
    builder.add_unconditional_edge(then, join).unwrap();
    builder.add_unconditional_edge(other, join).unwrap();
    builder.add_branch(join, target, exit).unwrap();
    builder.add_unconditional_edge(target, exit).unwrap();

    Scenario {
        graph: builder.build(),
        targets: vec![target],
        parameters: vec![c],
    }
}

/// Entry jumps straight to Exit; `dead` (the target) has no path from Entry
pub fn scenario_c() -> Scenario {
    let x = Variable::new("x", DataType::i32());
    let mut builder = FlowGraphBuilder::new(vec![x.clone()], vec![]);
    let skip = builder.add_empty_block();
    let dead = builder.add_operation(Operation::assign(
        &x,
        Expression::add(Expression::var(&x), Expression::signed(1, 32)),
    ));
    let (entry, exit) = (builder.entry(), builder.exit());

    builder.add_sequence(&[entry, skip, exit]).unwrap();
    builder.add_unconditional_edge(dead, exit).unwrap();

    Scenario {
        graph: builder.build(),
        targets: vec![dead],
        parameters: vec![x],
    }
}

/// The only path to Exit runs through a Call
pub fn unsupported_call() -> Scenario {
    let x = Variable::new("x", DataType::i32());
    let mut builder = FlowGraphBuilder::new(vec![x.clone()], vec![]);
    let call = builder.add_operation(Operation::Call {
        signature: CallSignature::new("sink", vec![DataType::i32()], vec![]),
        arguments: vec![Expression::var(&x)],
        returns: None,
    });
    let (entry, exit) = (builder.entry(), builder.exit());
    builder.add_sequence(&[entry, call, exit]).unwrap();

    Scenario {
        graph: builder.build(),
        targets: vec![exit],
        parameters: vec![x],
    }
}

/// ```text
/// i = 0
/// while (i < limit) i = i + 1
/// if (i == expect) -> T   // target
/// ```
pub fn counting_loop(limit: i64, expect: i64) -> Scenario {
    let i = Variable::new("i", DataType::u8());
    let ei = IntExpr::var(&i);

    let mut builder = FlowGraphBuilder::new(vec![], vec![]);
    let init = builder.add_operation(Operation::assign(&i, ei.literal(0).into()));
    let head = builder.add_operation(Operation::jump(ei.lt(limit).into()));
    let body = builder.add_operation(Operation::assign(&i, (ei.clone() + 1).into()));
    let after = builder.add_operation(Operation::jump(ei.eq(expect).into()));
    let target = builder.add_empty_block();
    let (entry, exit) = (builder.entry(), builder.exit());

    builder.add_sequence(&[entry, init, head]).unwrap();
    builder.add_branch(head, body, after).unwrap();
    builder.add_unconditional_edge(body, head).unwrap();
    builder.add_branch(after, target, exit).unwrap();
    builder.add_unconditional_edge(target, exit).unwrap();

    Scenario {
        graph: builder.build(),
        targets: vec![target],
        parameters: vec![],
    }
}

/// `if (flag && n >= lo && n <= hi) -> T`, unsatisfiable when `lo > hi`
pub fn guarded_range(lo: i64, hi: i64) -> Scenario {
    let flag = Variable::new("flag", DataType::Boolean);
    let n = Variable::new("n", DataType::i64());
    let en = IntExpr::var(&n);
    let guard = BoolExpr::var(&flag) & en.ge(lo) & en.le(hi);

    let mut builder = FlowGraphBuilder::new(vec![flag.clone(), n.clone()], vec![]);
    let cond = builder.add_operation(Operation::jump(guard.into()));
    let target = builder.add_empty_block();
    let (entry, exit) = (builder.entry(), builder.exit());

    builder.add_unconditional_edge(entry, cond).unwrap();
    builder.add_branch(cond, target, exit).unwrap();
    builder.add_unconditional_edge(target, exit).unwrap();

    Scenario {
        graph: builder.build(),
        targets: vec![target],
        parameters: vec![flag, n],
    }
}
