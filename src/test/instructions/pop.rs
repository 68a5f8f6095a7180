use super::*;

#[test]
fn push_pop_round_trip() {
    // PUSH x; PUSH y; POP -> y; POP -> x.
    let processor = run_to_halt(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        0x11,
        isa::ld(Reg::R0, Mode::Immediate, 0),
        0x22,
        isa::push(Reg::A),
        isa::push(Reg::R0),
        isa::pop(Reg::R1), // y
        isa::pop(Reg::A),  // x
        constants::OP_HLT,
    ]);

    assert_eq!(processor.register(Reg::R1), 0x22);
    assert_eq!(processor.register(Reg::A), 0x11);
    assert_eq!(processor.sp(), 0);
}

#[test]
fn full_depth_round_trip() {
    let processor = run_to_halt(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        1,
        isa::push(Reg::A),
        isa::ld(Reg::A, Mode::Immediate, 0),
        2,
        isa::push(Reg::A),
        isa::ld(Reg::A, Mode::Immediate, 0),
        3,
        isa::push(Reg::A),
        isa::ld(Reg::A, Mode::Immediate, 0),
        4,
        isa::push(Reg::A),
        isa::pop(Reg::A),
        isa::pop(Reg::R0),
        isa::pop(Reg::R1),
        constants::OP_HLT,
    ]);

    assert_eq!(processor.register(Reg::A), 4);
    assert_eq!(processor.register(Reg::R0), 3);
    assert_eq!(processor.register(Reg::R1), 2);
    assert_eq!(processor.sp(), 1);
}

#[test]
fn underflow_on_empty_stack() {
    let fault = run_to_fault(&[isa::pop(Reg::A), constants::OP_HLT]);

    assert_eq!(fault.kind, FaultKind::StackUnderflow);
    assert_eq!(fault.addr, 0);
}
