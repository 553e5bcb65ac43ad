/*!
 * Decoder Tests
 * Grammar rules, normalization and error messages
 */

use pretty_assertions::assert_eq;
use rr_simulator::{decode, ArithOp, DecodeError, Instruction, Operand, Register};

#[test]
fn test_all_opcodes_decode() {
    let cases = [
        ("NOP", Instruction::Nop),
        ("INC CX", Instruction::Inc { reg: Register::CX }),
        ("JMP 4", Instruction::Jmp { target: 4 }),
        (
            "ADD AX, BX",
            Instruction::Arith {
                op: ArithOp::Add,
                dest: Register::AX,
                src: Operand::Register(Register::BX),
            },
        ),
        (
            "SUB BX, -2",
            Instruction::Arith {
                op: ArithOp::Sub,
                dest: Register::BX,
                src: Operand::Immediate(-2),
            },
        ),
        (
            "MUL CX,CX",
            Instruction::Arith {
                op: ArithOp::Mul,
                dest: Register::CX,
                src: Operand::Register(Register::CX),
            },
        ),
    ];

    for (text, expected) in cases {
        assert_eq!(decode(text), Ok(expected), "decoding {text:?}");
    }
}

#[test]
fn test_case_and_whitespace_insensitive() {
    assert_eq!(decode("\t add  ax ,  7  "), decode("ADD AX, 7"));
    assert_eq!(decode("Inc bX"), decode("INC BX"));
}

#[test]
fn test_decode_is_repeatable() {
    for text in ["NOP", "JMP 2", "MUL AX, 0", "ADD", "FOO BAR"] {
        assert_eq!(decode(text), decode(text));
    }
}

#[test]
fn test_canonical_text_decodes_to_same_instruction() {
    for text in ["nop", "inc ax", "jmp 12", "sub cx ,bx", "mul bx, -9"] {
        let instruction = decode(text).unwrap();
        assert_eq!(decode(&instruction.to_string()), Ok(instruction));
    }
}

#[test]
fn test_rule_violations() {
    assert_eq!(decode("   "), Err(DecodeError::Empty));
    assert_eq!(decode("NOP 1"), Err(DecodeError::NopOperands));
    assert_eq!(decode("INC"), Err(DecodeError::MissingRegister));
    assert_eq!(
        decode("INC 3"),
        Err(DecodeError::InvalidRegister("3".to_string()))
    );
    assert_eq!(decode("JMP"), Err(DecodeError::MissingJumpTarget));
    assert_eq!(
        decode("JMP -4"),
        Err(DecodeError::NegativeJumpTarget("-4".to_string()))
    );
    assert_eq!(
        decode("JMP -123456789012345678901234567890"),
        Err(DecodeError::NegativeJumpTarget(
            "-123456789012345678901234567890".to_string()
        ))
    );
    assert_eq!(
        decode("JMP AX"),
        Err(DecodeError::InvalidJumpTarget("AX".to_string()))
    );
    assert_eq!(
        decode("ADD"),
        Err(DecodeError::MissingOperands("ADD".to_string()))
    );
    assert_eq!(
        decode("SUB AX 1"),
        Err(DecodeError::MissingComma("SUB".to_string()))
    );
    assert_eq!(
        decode("MUL 2, AX"),
        Err(DecodeError::InvalidDestination("2".to_string()))
    );
    assert_eq!(
        decode("ADD AX, DX"),
        Err(DecodeError::InvalidSource("DX".to_string()))
    );
    assert_eq!(
        decode("HLT"),
        Err(DecodeError::UnknownOpcode("HLT".to_string()))
    );
}

#[test]
fn test_error_messages_name_the_rule() {
    assert_eq!(
        decode("DIV AX, 2").unwrap_err().to_string(),
        "instruction not allowed: DIV"
    );
    assert_eq!(
        decode("JMP -1").unwrap_err().to_string(),
        "JMP target cannot be negative (-1)"
    );
    assert_eq!(
        decode("ADD AX 1").unwrap_err().to_string(),
        "ADD requires a comma between operands"
    );
}

#[test]
fn test_from_str() {
    let instruction: Instruction = "jmp 0".parse().unwrap();
    assert_eq!(instruction, Instruction::Jmp { target: 0 });
    assert!("".parse::<Instruction>().is_err());
}
