use super::*;

fn assert_invalid(opcode: u8) {
    let fault = run_to_fault(&[opcode]);

    assert_eq!(fault.kind, FaultKind::InvalidOpcode(opcode));
    assert_eq!(fault.addr, 0);
    assert_eq!(fault.cycle, 0);
}

#[test]
fn gap_between_variable_block_and_jmp() {
    assert_invalid(0x60 | 0x01); // 0x61, not a JMP
    assert_invalid(0x64);
}

#[test]
fn gap_after_branches() {
    assert_invalid(0x6C);
    assert_invalid(0x7F);
}

#[test]
fn register_groups_with_r_bit_set() {
    assert_invalid(isa::push(Reg::A) | constants::R_BIT_MASK); // 0x84
    assert_invalid(isa::pop(Reg::A) | constants::R_BIT_MASK);
    assert_invalid(isa::inc(Reg::A) | constants::R_BIT_MASK);
    assert_invalid(isa::dec(Reg::A) | constants::R_BIT_MASK);
}

#[test]
fn register_groups_with_unassigned_register_code() {
    assert_invalid(0x83); // PUSH with reg code 3
    assert_invalid(0x8B);
    assert_invalid(0x93);
    assert_invalid(0x9B);
}

#[test]
fn bytes_past_hlt() {
    assert_invalid(0xA9);
    assert_invalid(0xFF);
    assert_invalid(0xA1); // NOP group has a single assignment
}
