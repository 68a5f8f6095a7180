use super::*;

#[test]
fn immediate() {
    let processor = run_to_halt(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        0x10,
        isa::alu(AluOp::Add, Mode::Immediate, 0),
        0x22,
        constants::OP_HLT,
    ]);

    assert_eq!(processor.register(Reg::A), 0x32);
    assert!(!processor.zero());
    assert!(!processor.carry());
}

#[test]
fn carry_out_wraps_and_sets_z() {
    let processor = run_to_halt(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        0xFF,
        isa::alu(AluOp::Add, Mode::Immediate, 0),
        0x01,
        constants::OP_HLT,
    ]);

    assert_eq!(processor.register(Reg::A), 0x00);
    assert!(processor.zero());
    assert!(processor.carry());
}

#[test]
fn carry_without_zero() {
    let processor = run_to_halt(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        0xFF,
        isa::alu(AluOp::Add, Mode::Immediate, 0),
        0x02,
        constants::OP_HLT,
    ]);

    assert_eq!(processor.register(Reg::A), 0x01);
    assert!(!processor.zero());
    assert!(processor.carry());
}

#[test]
fn register_sources() {
    let processor = run_to_halt(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        4,
        isa::ld(Reg::R0, Mode::Immediate, 0),
        10,
        isa::ld(Reg::R1, Mode::Immediate, 0),
        20,
        isa::alu(AluOp::Add, Mode::Register, 0), // A += R0
        isa::alu(AluOp::Add, Mode::Register, 1), // A += R1
        constants::OP_HLT,
    ]);

    assert_eq!(processor.register(Reg::A), 34);
}

#[test]
fn direct_source() {
    let mut processor = load_processor(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        1,
        isa::alu(AluOp::Add, Mode::Direct, 0),
        0x30,
        constants::OP_HLT,
    ]);
    processor.load(0x30, 41);
    processor.run(constants::DEFAULT_MAX_CYCLES).unwrap();

    assert_eq!(processor.register(Reg::A), 42);
}
