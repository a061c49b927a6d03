//! This module is an integration test that checks the analysis against small,
//! hand-constructed, pieces of bytecode whose results are known exactly.
#![cfg(test)]

use gaslens::{
    analyzer::{Config, FunctionGasAttribution},
    bytecode,
    contract::Contract,
    opcode::{Opcode, PushN},
};

mod common;

#[test]
fn gas_is_additive_over_decoded_opcodes() -> anyhow::Result<()> {
    let report = common::analyze_hex("0x6001600201")?;

    assert_eq!(report.total_gas(), 9);
    assert_eq!(report.instructions_decoded(), 3);
    assert_eq!(report.opcode_frequency().len(), 2);
    assert_eq!(report.opcode_frequency().get("PUSH1"), Some(&2));
    assert_eq!(report.opcode_frequency().get("ADD"), Some(&1));

    Ok(())
}

#[test]
fn stack_underflow_is_harmless() -> anyhow::Result<()> {
    let report = common::analyze_hex("50")?;

    assert_eq!(report.total_gas(), 2);
    assert_eq!(report.opcode_frequency().get("POP"), Some(&1));
    assert!(report.optimization_suggestions().is_empty());

    Ok(())
}

#[test]
fn forward_jump_is_not_a_loop() -> anyhow::Result<()> {
    // PUSH1 0x00, JUMPDEST, PUSH1 0x02, JUMP
    let report = common::analyze_hex("60005b600256")?;

    assert!(report.loops().is_empty());
    assert_eq!(report.total_gas(), 3 + 1 + 3 + 8);
    assert_eq!(report.opcode_frequency().get("PUSH1"), Some(&2));
    assert_eq!(report.opcode_frequency().get("JUMPDEST"), Some(&1));
    assert_eq!(report.opcode_frequency().get("JUMP"), Some(&1));
    assert!(!report
        .optimization_suggestions()
        .iter()
        .any(|s| s.starts_with("Consider gas limits")));

    Ok(())
}

#[test]
fn backward_jump_is_reported_as_a_loop() {
    // Enough padding that the pushed target lies behind the jump.
    let mut bytes = vec![Opcode::JUMPDEST.as_byte(); 0x70];
    bytes.extend(bytecode![PushN::new(1, vec![0x60]).unwrap(), Opcode::JUMPI]);
    let report = gaslens::analyze(bytes);

    assert_eq!(report.loops().len(), 1);
    assert_eq!(report.loops()[0].target_pc, 0x60);
    assert_eq!(report.loops()[0].jump_pc, 0x72);
    assert_eq!(report.loops()[0].count, 1);
    assert_eq!(
        report.optimization_suggestions(),
        &["Consider gas limits for loops to prevent out-of-gas errors".to_string()]
    );
}

#[test]
fn every_push4_is_a_candidate_function() {
    let bytes = bytecode![
        PushN::new(4, vec![0xa9, 0x05, 0x9c, 0xbb]).unwrap(),
        Opcode::POP,
        PushN::new(4, vec![0xff, 0xff, 0xff, 0xff]).unwrap(),
        Opcode::POP,
    ];
    let report = gaslens::analyze(bytes);

    let functions = report.functions();
    assert_eq!(functions.len(), 2);
    assert_eq!(functions[0].selector, "0xa9059cbb");
    assert_eq!(functions[0].entry_pc, 0);
    assert_eq!(functions[1].selector, "0xffffffff");
    assert_eq!(functions[1].entry_pc, 6);
}

#[test]
fn later_gas_is_charged_to_every_earlier_function() {
    let bytes = bytecode![
        PushN::new(4, vec![0, 0, 0, 1]).unwrap(),
        PushN::new(4, vec![0, 0, 0, 2]).unwrap(),
        Opcode::SSTORE,
    ];
    let report = gaslens::analyze(bytes);

    let gas: Vec<u64> = report.functions().iter().map(|f| f.gas).collect();
    assert_eq!(gas, vec![20_006, 20_003]);
    assert!(gas.iter().sum::<u64>() > report.total_gas());
}

#[test]
fn range_scoped_gas_partitions_the_total() {
    let bytes = bytecode![
        PushN::new(4, vec![0, 0, 0, 1]).unwrap(),
        PushN::new(4, vec![0, 0, 0, 2]).unwrap(),
        Opcode::SSTORE,
    ];
    let config =
        Config::default().with_function_gas_attribution(FunctionGasAttribution::RangeScoped);
    let report = gaslens::new(Contract::new(bytes), config).analyze();

    let gas: Vec<u64> = report.functions().iter().map(|f| f.gas).collect();
    assert_eq!(gas, vec![3, 20_003]);
    assert_eq!(gas.iter().sum::<u64>(), report.total_gas());
}

#[test]
fn repeated_storage_access_is_flagged() {
    // Four reads of slot 3, then two back-to-back writes to slot 3.
    let mut bytes = vec![];
    for _ in 0..4 {
        bytes.extend(bytecode![
            PushN::new(1, vec![0x03]).unwrap(),
            Opcode::SLOAD,
            Opcode::POP
        ]);
    }
    bytes.extend(bytecode![
        PushN::new(1, vec![0x01]).unwrap(),
        PushN::new(1, vec![0x03]).unwrap(),
        PushN::new(1, vec![0x01]).unwrap(),
        PushN::new(1, vec![0x03]).unwrap(),
        Opcode::SSTORE,
        Opcode::SSTORE,
    ]);
    let report = gaslens::analyze(bytes);

    assert_eq!(report.storage_reads().get(&3), Some(&4));
    assert_eq!(report.storage_writes().get(&3), Some(&2));
    assert_eq!(report.longest_store_run(), 2);
    assert_eq!(
        report.optimization_suggestions(),
        &[
            "Cache storage slot 3 in memory (read 4 times)".to_string(),
            "Detected 2 consecutive SSTORE instructions - consider packing variables".to_string(),
        ]
    );
}

#[test]
fn truncated_push_ends_the_analysis() -> anyhow::Result<()> {
    // STOP, then a PUSH32 with only two bytes of data.
    let report = common::analyze_hex("007fdead")?;

    assert_eq!(report.instructions_decoded(), 2);
    assert_eq!(report.bytes_analysed(), 4);
    assert_eq!(report.total_gas(), 3);
    assert_eq!(report.opcode_frequency().get("PUSH32"), Some(&1));

    Ok(())
}

#[test]
fn identical_input_gives_identical_reports() -> anyhow::Result<()> {
    let first = common::analyze_hex(common::PROXY_CONTRACT)?;
    let second = common::analyze_hex(common::PROXY_CONTRACT)?;

    assert_eq!(first, second);
    assert_eq!(serde_json::to_string(&first)?, serde_json::to_string(&second)?);

    Ok(())
}
