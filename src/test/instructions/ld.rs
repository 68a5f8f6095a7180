use super::*;

#[test]
fn immediate() {
    let processor = run_to_halt(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        0x41,
        isa::ld(Reg::R0, Mode::Immediate, 0),
        0x42,
        isa::ld(Reg::R1, Mode::Immediate, 0),
        0x43,
        constants::OP_HLT,
    ]);

    assert_eq!(processor.register(Reg::A), 0x41);
    assert_eq!(processor.register(Reg::R0), 0x42);
    assert_eq!(processor.register(Reg::R1), 0x43);
}

// Register mode exercises the cross table: the R bit picks one of the two
// registers that are not the destination.

#[test]
fn register_into_a() {
    let processor = run_to_halt(&[
        isa::ld(Reg::R0, Mode::Immediate, 0),
        5,
        isa::ld(Reg::R1, Mode::Immediate, 0),
        9,
        isa::ld(Reg::A, Mode::Register, 0), // A <- R0
        constants::OP_HLT,
    ]);
    assert_eq!(processor.register(Reg::A), 5);

    let processor = run_to_halt(&[
        isa::ld(Reg::R1, Mode::Immediate, 0),
        9,
        isa::ld(Reg::A, Mode::Register, 1), // A <- R1
        constants::OP_HLT,
    ]);
    assert_eq!(processor.register(Reg::A), 9);
}

#[test]
fn register_into_r0() {
    let processor = run_to_halt(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        3,
        isa::ld(Reg::R1, Mode::Immediate, 0),
        7,
        isa::ld(Reg::R0, Mode::Register, 0), // R0 <- A
        constants::OP_HLT,
    ]);
    assert_eq!(processor.register(Reg::R0), 3);

    let processor = run_to_halt(&[
        isa::ld(Reg::R1, Mode::Immediate, 0),
        7,
        isa::ld(Reg::R0, Mode::Register, 1), // R0 <- R1
        constants::OP_HLT,
    ]);
    assert_eq!(processor.register(Reg::R0), 7);
}

#[test]
fn register_into_r1() {
    let processor = run_to_halt(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        11,
        isa::ld(Reg::R0, Mode::Immediate, 0),
        13,
        isa::ld(Reg::R1, Mode::Register, 0), // R1 <- A
        constants::OP_HLT,
    ]);
    assert_eq!(processor.register(Reg::R1), 11);

    let processor = run_to_halt(&[
        isa::ld(Reg::R0, Mode::Immediate, 0),
        13,
        isa::ld(Reg::R1, Mode::Register, 1), // R1 <- R0
        constants::OP_HLT,
    ]);
    assert_eq!(processor.register(Reg::R1), 13);
}

#[test]
fn direct() {
    let mut processor = load_processor(&[
        isa::ld(Reg::A, Mode::Direct, 0),
        0x20,
        constants::OP_HLT,
    ]);
    processor.load(0x20, 0x99);
    processor.run(constants::DEFAULT_MAX_CYCLES).unwrap();

    assert_eq!(processor.register(Reg::A), 0x99);
}

#[test]
fn indexed() {
    let mut processor = load_processor(&[
        isa::ld(Reg::R0, Mode::Immediate, 0),
        0x20,
        isa::ld(Reg::A, Mode::Indexed, 0),
        0x02,
        constants::OP_HLT,
    ]);
    processor.load(0x22, 0x55);
    processor.run(constants::DEFAULT_MAX_CYCLES).unwrap();

    assert_eq!(processor.register(Reg::A), 0x55);
}

#[test]
fn indexed_via_r1() {
    let mut processor = load_processor(&[
        isa::ld(Reg::R1, Mode::Immediate, 0),
        0x30,
        isa::ld(Reg::A, Mode::Indexed, 1),
        0x00,
        constants::OP_HLT,
    ]);
    processor.load(0x30, 0x77);
    processor.run(constants::DEFAULT_MAX_CYCLES).unwrap();

    assert_eq!(processor.register(Reg::A), 0x77);
}

#[test]
fn indexed_effective_address_wraps() {
    let mut processor = load_processor(&[
        isa::ld(Reg::R0, Mode::Immediate, 0),
        0xF0,
        isa::ld(Reg::A, Mode::Indexed, 0),
        0x20, // 0xF0 + 0x20 wraps to 0x10
        constants::OP_HLT,
    ]);
    processor.load(0x10, 0xAB);
    processor.run(constants::DEFAULT_MAX_CYCLES).unwrap();

    assert_eq!(processor.register(Reg::A), 0xAB);
}
