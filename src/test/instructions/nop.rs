use super::*;

#[test]
fn has_no_effect() {
    let processor = run_to_halt(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        0x42,
        constants::OP_NOP,
        constants::OP_NOP,
        constants::OP_HLT,
    ]);

    assert_eq!(processor.register(Reg::A), 0x42);
    assert!(!processor.zero());
    assert!(!processor.carry());
    assert_eq!(processor.cycles(), 4);
}
