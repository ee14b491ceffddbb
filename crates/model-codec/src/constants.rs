/// Failure codes attached to codec errors.
///
/// ATTENTION: Only add new error codes at the end of the list !!!
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Str = 0,
    Int = 1,
    Num = 2,
    Bool = 3,
    Arr = 4,
    Obj = 5,
    Map = 6,
    Enum = 7,
    Or = 8,
    Null = 9,
    Key = 10,
    UnknownKey = 11,
    StrLen = 12,
    ArrLen = 13,
    Gt = 14,
    Gte = 15,
    Lt = 16,
    Lte = 17,
}

impl ErrorCode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Str => "STR",
            Self::Int => "INT",
            Self::Num => "NUM",
            Self::Bool => "BOOL",
            Self::Arr => "ARR",
            Self::Obj => "OBJ",
            Self::Map => "MAP",
            Self::Enum => "ENUM",
            Self::Or => "OR",
            Self::Null => "NULL",
            Self::Key => "KEY",
            Self::UnknownKey => "UNKNOWN_KEY",
            Self::StrLen => "STR_LEN",
            Self::ArrLen => "ARR_LEN",
            Self::Gt => "GT",
            Self::Gte => "GTE",
            Self::Lt => "LT",
            Self::Lte => "LTE",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Str => "Not a string.",
            Self::Int => "Not an integer.",
            Self::Num => "Not a number.",
            Self::Bool => "Not a boolean.",
            Self::Arr => "Not an array.",
            Self::Obj => "Not an object.",
            Self::Map => "Not a map.",
            Self::Enum => "Not an enum value.",
            Self::Or => "None of types matched.",
            Self::Null => "Unexpected null.",
            Self::Key => "Missing key.",
            Self::UnknownKey => "Unknown key.",
            Self::StrLen => "Invalid string length.",
            Self::ArrLen => "Invalid array length.",
            Self::Gt => "Value is too small.",
            Self::Gte => "Value is too small.",
            Self::Lt => "Value is too large.",
            Self::Lte => "Value is too large.",
        }
    }

    /// Whether this code reports a violated range or length bound.
    pub fn is_constraint(self) -> bool {
        matches!(
            self,
            Self::StrLen | Self::ArrLen | Self::Gt | Self::Gte | Self::Lt | Self::Lte
        )
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ErrorCode::Str as u8, 0);
        assert_eq!(ErrorCode::Gte as u8, 15);
        assert_eq!(ErrorCode::Lte as u8, 17);
    }

    #[test]
    fn constraint_codes() {
        assert!(ErrorCode::Gte.is_constraint());
        assert!(ErrorCode::StrLen.is_constraint());
        assert!(!ErrorCode::Int.is_constraint());
        assert!(!ErrorCode::Null.is_constraint());
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(ErrorCode::UnknownKey.to_string(), "UNKNOWN_KEY");
        assert_eq!(ErrorCode::Enum.message(), "Not an enum value.");
    }
}
