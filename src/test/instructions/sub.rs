use super::*;

#[test]
fn no_borrow_sets_carry() {
    let processor = run_to_halt(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        5,
        isa::alu(AluOp::Sub, Mode::Immediate, 0),
        3,
        constants::OP_HLT,
    ]);

    assert_eq!(processor.register(Reg::A), 2);
    assert!(!processor.zero());
    assert!(processor.carry());
}

#[test]
fn borrow_clears_carry_and_wraps() {
    let processor = run_to_halt(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        3,
        isa::alu(AluOp::Sub, Mode::Immediate, 0),
        5,
        constants::OP_HLT,
    ]);

    assert_eq!(processor.register(Reg::A), 0xFE);
    assert!(!processor.zero());
    assert!(!processor.carry());
}

#[test]
fn equal_operands_set_zero_and_carry() {
    let processor = run_to_halt(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        7,
        isa::alu(AluOp::Sub, Mode::Immediate, 0),
        7,
        constants::OP_HLT,
    ]);

    assert_eq!(processor.register(Reg::A), 0);
    assert!(processor.zero());
    assert!(processor.carry());
}

#[test]
fn register_source() {
    let processor = run_to_halt(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        9,
        isa::ld(Reg::R1, Mode::Immediate, 0),
        4,
        isa::alu(AluOp::Sub, Mode::Register, 1),
        constants::OP_HLT,
    ]);

    assert_eq!(processor.register(Reg::A), 5);
}
