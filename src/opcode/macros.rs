//! This module contains useful macros for working with bytecode and opcodes.

/// Constructs a bytecode input from the input instructions as literal opcodes.
///
/// # Usage
///
/// ```
/// use gaslens::{
///     bytecode,
///     opcode::{Encode, Opcode, PushN},
/// };
///
/// let bytes = bytecode![
///     PushN::new(1, vec![0x02]).unwrap(),
///     Opcode::JUMP,
///     Opcode::JUMPDEST,
///     Opcode::STOP,
/// ];
///
/// let mut expected: Vec<u8> = vec![];
/// expected.extend(PushN::new(1, vec![0x02]).unwrap().encode());
/// expected.extend(Opcode::JUMP.encode());
/// expected.extend(Opcode::JUMPDEST.encode());
/// expected.extend(Opcode::STOP.encode());
///
/// assert_eq!(bytes, expected);
/// ```
#[macro_export]
macro_rules! bytecode {
    ($($path:expr),*$(,)?) => {{
        use $crate::opcode::Encode;
        let mut vec: Vec<u8> = vec![];
        $(vec.extend($path.encode()));*;
        vec
    }};
}
