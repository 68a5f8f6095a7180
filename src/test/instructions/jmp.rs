use super::*;

#[test]
fn skips_over_code() {
    let processor = run_to_halt(&[
        constants::OP_JMP,
        0x04,
        isa::ld(Reg::A, Mode::Immediate, 0), // skipped
        0xEE,
        constants::OP_HLT,
    ]);

    assert_eq!(processor.register(Reg::A), 0);
    assert_eq!(processor.cycles(), 2);
}

#[test]
fn jump_to_unloaded_address_faults_on_fetch() {
    let fault = run_to_fault(&[constants::OP_JMP, 0x80]);

    assert_eq!(fault.kind, FaultKind::UnloadedFetch);
    assert_eq!(fault.addr, 0x80);
    assert_eq!(fault.cycle, 1);
}

#[test]
fn backward_jump() {
    // Forward to 0x04, then back onto the HLT at 0x02.
    let mut processor = load_processor(&[
        constants::OP_JMP,
        0x04,
        constants::OP_HLT, // target of the second jump
        constants::OP_NOP,
        constants::OP_JMP,
        0x02,
    ]);
    processor.run(constants::DEFAULT_MAX_CYCLES).unwrap();

    assert_eq!(processor.cycles(), 3);
    assert!(processor.halted());
}
