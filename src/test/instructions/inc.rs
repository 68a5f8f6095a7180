use super::*;

#[test]
fn increments_each_register() {
    let processor = run_to_halt(&[
        isa::inc(Reg::A),
        isa::inc(Reg::R0),
        isa::inc(Reg::R0),
        isa::inc(Reg::R1),
        constants::OP_HLT,
    ]);

    assert_eq!(processor.register(Reg::A), 1);
    assert_eq!(processor.register(Reg::R0), 2);
    assert_eq!(processor.register(Reg::R1), 1);
}

#[test]
fn wrap_to_zero_sets_z() {
    let processor = run_to_halt(&[
        isa::ld(Reg::R0, Mode::Immediate, 0),
        0xFF,
        isa::inc(Reg::R0),
        constants::OP_HLT,
    ]);

    assert_eq!(processor.register(Reg::R0), 0);
    assert!(processor.zero());
}

#[test]
fn carry_unchanged() {
    let processor = run_to_halt(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        0xFF,
        isa::alu(AluOp::Add, Mode::Immediate, 0), // sets C
        0x01,
        isa::inc(Reg::R1),
        constants::OP_HLT,
    ]);

    assert!(processor.carry());
}
