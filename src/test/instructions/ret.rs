use super::*;

#[test]
fn returns_to_pushed_address() {
    // PUSH a hand-made return address via the stack ops.
    let processor = run_to_halt(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        0x05,
        isa::push(Reg::A),
        constants::OP_RET, // pops 0x05
        constants::OP_HLT, // skipped
        constants::OP_HLT, // 0x05
    ]);

    assert_eq!(processor.cycles(), 4);
}

#[test]
fn underflow_without_call() {
    let fault = run_to_fault(&[constants::OP_RET]);

    assert_eq!(fault.kind, FaultKind::StackUnderflow);
    assert_eq!(fault.addr, 0);
    assert_eq!(fault.cycle, 0);
}
