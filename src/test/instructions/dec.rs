use super::*;

#[test]
fn decrement_to_zero_sets_z() {
    let processor = run_to_halt(&[
        isa::ld(Reg::R0, Mode::Immediate, 0),
        1,
        isa::dec(Reg::R0),
        constants::OP_HLT,
    ]);

    assert_eq!(processor.register(Reg::R0), 0);
    assert!(processor.zero());
}

#[test]
fn wraps_below_zero() {
    let processor = run_to_halt(&[isa::dec(Reg::A), constants::OP_HLT]);

    assert_eq!(processor.register(Reg::A), 0xFF);
    assert!(!processor.zero());
}

#[test]
fn carry_unchanged() {
    let processor = run_to_halt(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        5,
        isa::alu(AluOp::Sub, Mode::Immediate, 0), // 5 >= 3 sets C
        3,
        isa::dec(Reg::A),
        constants::OP_HLT,
    ]);

    assert!(processor.carry());
    assert_eq!(processor.register(Reg::A), 1);
}
