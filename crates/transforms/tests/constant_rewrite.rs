use athanor_core::ast::{Block, Expression, Identifier, Statement};
use athanor_core::gas::GasMeter;
use athanor_core::{EvmVersion, U256};
use athanor_transforms::literal_rewrite::ConstantRewrite;
use athanor_transforms::pass::{DefaultPass, Pass};
use athanor_transforms::{PassConfig, Transform};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .try_init();
}

fn declaration(name: &str, value: Expression) -> Statement {
    Statement::VariableDeclaration {
        names: vec![Identifier { name: name.into() }],
        value: Some(value),
    }
}

fn sample_program() -> Block {
    Block {
        statements: vec![
            declaration("mask", Expression::number(U256::from(0xffffu64) << 80usize)),
            declaration("small", Expression::number(U256::from(42u64))),
            Statement::If {
                condition: Expression::identifier("flag"),
                body: Block {
                    statements: vec![Statement::Assignment {
                        targets: vec![Identifier { name: "mask".into() }],
                        value: Expression::number(!U256::from(2u64)),
                    }],
                },
            },
        ],
    }
}

#[test]
fn pass_rewrites_constants_and_lowers_gas() {
    init_tracing();
    let config = PassConfig::default();
    let mut program = sample_program();

    let meter = GasMeter::new(config.evm_version, config.runs);
    let before = meter.block_costs(&program);

    let passes: Vec<Box<dyn Transform>> = vec![Box::new(ConstantRewrite::from_config(&config))];
    DefaultPass::from_config(&config)
        .run(&mut program, &passes)
        .unwrap();

    let after = meter.block_costs(&program);
    assert!(after < before, "rewrite should lower modeled gas");
    assert_eq!(
        program.to_string(),
        "{ let mask := shl(80, 65535) let small := 42 if flag { mask := not(2) } }"
    );
}

#[test]
fn rewriting_is_idempotent() {
    init_tracing();
    let config = PassConfig::default();
    let transform = ConstantRewrite::from_config(&config);
    let mut program = sample_program();

    assert!(transform.apply(&mut program).unwrap());
    let settled = program.clone();
    assert!(!transform.apply(&mut program).unwrap());
    assert_eq!(program, settled);
}

#[test]
fn run_count_decides_whether_corrections_pay_off() {
    init_tracing();
    // 3 * 2^80 - 1 needs a subtraction on top of the shift. The extra
    // instruction is fine when the code runs once, but at 200 expected runs
    // its execution gas outweighs the saved immediate bytes.
    let value = (U256::from(3u64) << 80usize) - U256::ONE;

    let mut cheap_runs = Block {
        statements: vec![declaration("x", Expression::number(value))],
    };
    let once = PassConfig {
        runs: 1,
        ..PassConfig::default()
    };
    assert!(ConstantRewrite::from_config(&once)
        .apply(&mut cheap_runs)
        .unwrap());
    assert_eq!(cheap_runs.to_string(), "{ let x := sub(shl(80, 3), 1) }");

    let mut hot = Block {
        statements: vec![declaration("x", Expression::number(value))],
    };
    let default_runs = PassConfig::default();
    assert!(!ConstantRewrite::from_config(&default_runs)
        .apply(&mut hot)
        .unwrap());
}

#[test]
fn old_forks_build_constants_without_shifts() {
    init_tracing();
    let value = (U256::from(3u64) << 80usize) - U256::ONE;
    let mut program = Block {
        statements: vec![declaration("x", Expression::number(value))],
    };

    let config = PassConfig {
        evm_version: EvmVersion::Byzantium,
        runs: 1,
        ..PassConfig::default()
    };
    assert!(ConstantRewrite::from_config(&config)
        .apply(&mut program)
        .unwrap());
    assert_eq!(
        program.to_string(),
        "{ let x := sub(mul(3, exp(2, 80)), 1) }"
    );
}

#[test]
fn zero_step_budget_disables_decomposition() {
    init_tracing();
    let config = PassConfig {
        max_steps: 0,
        ..PassConfig::default()
    };
    let mut program = Block {
        statements: vec![declaration(
            "mask",
            Expression::number(U256::from(0xffffu64) << 80usize),
        )],
    };

    // Complements do not consume search steps, so only the shift candidate
    // disappears.
    assert!(!ConstantRewrite::from_config(&config)
        .apply(&mut program)
        .unwrap());

    let mut complement = Block {
        statements: vec![declaration("x", Expression::number(!U256::from(2u64)))],
    };
    assert!(ConstantRewrite::from_config(&config)
        .apply(&mut complement)
        .unwrap());
    assert_eq!(complement.to_string(), "{ let x := not(2) }");
}
