/*!
 * Instruction Decoder
 * Validates a line of text and turns it into a typed instruction
 */

use super::types::{ArithOp, Instruction, Operand, Register};
use crate::core::errors::{DecodeError, DecodeResult};
use crate::core::types::{Address, Word};
use std::str::FromStr;

/// Decode one line of instruction text.
///
/// Surrounding whitespace is ignored and mnemonics/registers are case-insensitive.
/// Decoding has no side effects: the same text always yields the same result.
pub fn decode(line: &str) -> DecodeResult<Instruction> {
    let normalized = line.trim().to_ascii_uppercase();
    if normalized.is_empty() {
        return Err(DecodeError::Empty);
    }

    let (op, rest) = split_opcode(&normalized);

    match op {
        "NOP" => {
            if !rest.is_empty() {
                return Err(DecodeError::NopOperands);
            }
            Ok(Instruction::Nop)
        }
        "INC" => {
            if rest.is_empty() {
                return Err(DecodeError::MissingRegister);
            }
            let reg = Register::from_name(rest)
                .ok_or_else(|| DecodeError::InvalidRegister(rest.to_string()))?;
            Ok(Instruction::Inc { reg })
        }
        "JMP" => decode_jump(rest),
        _ => match ArithOp::from_mnemonic(op) {
            Some(arith) => decode_arith(arith, rest),
            None => Err(DecodeError::UnknownOpcode(op.to_string())),
        },
    }
}

/// Split into the mnemonic and the trimmed operand text
fn split_opcode(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((op, rest)) => (op, rest.trim()),
        None => (line, ""),
    }
}

fn decode_jump(rest: &str) -> DecodeResult<Instruction> {
    if rest.is_empty() {
        return Err(DecodeError::MissingJumpTarget);
    }

    if let Some(magnitude) = rest.strip_prefix('-') {
        if !magnitude.is_empty() && magnitude.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DecodeError::NegativeJumpTarget(rest.to_string()));
        }
        return Err(DecodeError::InvalidJumpTarget(rest.to_string()));
    }

    let target =
        Address::from_str(rest).map_err(|_| DecodeError::InvalidJumpTarget(rest.to_string()))?;
    Ok(Instruction::Jmp { target })
}

fn decode_arith(op: ArithOp, rest: &str) -> DecodeResult<Instruction> {
    if rest.is_empty() {
        return Err(DecodeError::MissingOperands(op.mnemonic().to_string()));
    }

    let (dest, src) = rest
        .split_once(',')
        .ok_or_else(|| DecodeError::MissingComma(op.mnemonic().to_string()))?;
    let (dest, src) = (dest.trim(), src.trim());

    let dest =
        Register::from_name(dest).ok_or_else(|| DecodeError::InvalidDestination(dest.to_string()))?;

    let src = match Register::from_name(src) {
        Some(reg) => Operand::Register(reg),
        None => Word::from_str(src)
            .map(Operand::Immediate)
            .map_err(|_| DecodeError::InvalidSource(src.to_string()))?,
    };

    Ok(Instruction::Arith { op, dest, src })
}

impl FromStr for Instruction {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_nop() {
        assert_eq!(decode("NOP"), Ok(Instruction::Nop));
        assert_eq!(decode("  nop \r\n"), Ok(Instruction::Nop));
        assert_eq!(decode("NOP AX"), Err(DecodeError::NopOperands));
    }

    #[test]
    fn test_decode_inc() {
        assert_eq!(decode("inc bx"), Ok(Instruction::Inc { reg: Register::BX }));
        assert_eq!(decode("INC"), Err(DecodeError::MissingRegister));
        assert_eq!(
            decode("INC DX"),
            Err(DecodeError::InvalidRegister("DX".to_string()))
        );
        assert_eq!(
            decode("INC AX BX"),
            Err(DecodeError::InvalidRegister("AX BX".to_string()))
        );
    }

    #[test]
    fn test_decode_jmp() {
        assert_eq!(decode("JMP 0"), Ok(Instruction::Jmp { target: 0 }));
        assert_eq!(decode("jmp   99"), Ok(Instruction::Jmp { target: 99 }));
        assert_eq!(decode("JMP"), Err(DecodeError::MissingJumpTarget));
        assert_eq!(
            decode("JMP -1"),
            Err(DecodeError::NegativeJumpTarget("-1".to_string()))
        );
        assert_eq!(
            decode("JMP -99999999999999999999"),
            Err(DecodeError::NegativeJumpTarget(
                "-99999999999999999999".to_string()
            ))
        );
        assert_eq!(
            decode("JMP -"),
            Err(DecodeError::InvalidJumpTarget("-".to_string()))
        );
        assert_eq!(
            decode("JMP 3x"),
            Err(DecodeError::InvalidJumpTarget("3X".to_string()))
        );
    }

    #[test]
    fn test_decode_arith_register_and_immediate() {
        assert_eq!(
            decode("ADD AX, 3"),
            Ok(Instruction::Arith {
                op: ArithOp::Add,
                dest: Register::AX,
                src: Operand::Immediate(3),
            })
        );
        assert_eq!(
            decode("sub cx,bx"),
            Ok(Instruction::Arith {
                op: ArithOp::Sub,
                dest: Register::CX,
                src: Operand::Register(Register::BX),
            })
        );
        assert_eq!(
            decode("MUL BX , -7"),
            Ok(Instruction::Arith {
                op: ArithOp::Mul,
                dest: Register::BX,
                src: Operand::Immediate(-7),
            })
        );
    }

    #[test]
    fn test_decode_arith_errors() {
        assert_eq!(
            decode("ADD"),
            Err(DecodeError::MissingOperands("ADD".to_string()))
        );
        assert_eq!(
            decode("SUB AX 3"),
            Err(DecodeError::MissingComma("SUB".to_string()))
        );
        assert_eq!(
            decode("MUL 3, AX"),
            Err(DecodeError::InvalidDestination("3".to_string()))
        );
        assert_eq!(
            decode("ADD AX, 3abc"),
            Err(DecodeError::InvalidSource("3ABC".to_string()))
        );
        assert_eq!(
            decode("ADD AX, BX, CX"),
            Err(DecodeError::InvalidSource("BX, CX".to_string()))
        );
    }

    #[test]
    fn test_unknown_and_empty() {
        assert_eq!(decode("   "), Err(DecodeError::Empty));
        assert_eq!(
            decode("HALT"),
            Err(DecodeError::UnknownOpcode("HALT".to_string()))
        );
    }

    #[test]
    fn test_display_is_canonical() {
        let instr = decode("  add   ax ,   bx ").unwrap();
        assert_eq!(instr.to_string(), "ADD AX, BX");
        assert_eq!(decode(&instr.to_string()), Ok(instr));
    }
}
