//! Node and edge kind taxonomy

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of declaration an entry/exit pair belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclKind {
    Class,
    Interface,
    Enum,
    Method,
    Constructor,
    Initializer,
    Field,
    EnumConstant,
}

impl DeclKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclKind::Class => "CLASS",
            DeclKind::Interface => "INTERFACE",
            DeclKind::Enum => "ENUM",
            DeclKind::Method => "METHOD",
            DeclKind::Constructor => "CONSTRUCTOR",
            DeclKind::Initializer => "INITIALIZER",
            DeclKind::Field => "FIELD",
            DeclKind::EnumConstant => "ENUM_CONSTANT",
        }
    }

    /// Class, interface or enum
    pub fn is_type(&self) -> bool {
        matches!(self, DeclKind::Class | DeclKind::Interface | DeclKind::Enum)
    }

    /// Method, constructor or initializer: has formal parameters
    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            DeclKind::Method | DeclKind::Constructor | DeclKind::Initializer
        )
    }

    pub fn is_field_like(&self) -> bool {
        matches!(self, DeclKind::Field | DeclKind::EnumConstant)
    }
}

/// Statement node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementKind {
    Assignment,
    FieldDeclaration,
    LocalDeclaration,
    EnumConstantDeclaration,
    Assert,
    Break,
    Continue,
    Do,
    For,
    If,
    Return,
    SwitchCase,
    SwitchDefault,
    While,
    Empty,
    Label,
    Switch,
    Synchronized,
    Throw,
    Try,
    Catch,
    Finally,
}

impl StatementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::Assignment => "ASSIGNMENT",
            StatementKind::FieldDeclaration => "FIELD_DECLARATION",
            StatementKind::LocalDeclaration => "LOCAL_DECLARATION",
            StatementKind::EnumConstantDeclaration => "ENUM_CONSTANT_DECLARATION",
            StatementKind::Assert => "ASSERT",
            StatementKind::Break => "BREAK",
            StatementKind::Continue => "CONTINUE",
            StatementKind::Do => "DO",
            StatementKind::For => "FOR",
            StatementKind::If => "IF",
            StatementKind::Return => "RETURN",
            StatementKind::SwitchCase => "SWITCH_CASE",
            StatementKind::SwitchDefault => "SWITCH_DEFAULT",
            StatementKind::While => "WHILE",
            StatementKind::Empty => "EMPTY",
            StatementKind::Label => "LABEL",
            StatementKind::Switch => "SWITCH",
            StatementKind::Synchronized => "SYNCHRONIZED",
            StatementKind::Throw => "THROW",
            StatementKind::Try => "TRY",
            StatementKind::Catch => "CATCH",
            StatementKind::Finally => "FINALLY",
        }
    }

    pub fn is_loop(&self) -> bool {
        matches!(
            self,
            StatementKind::Do | StatementKind::For | StatementKind::While
        )
    }

    /// Unconditional transfer out of the normal sequence
    pub fn is_jump(&self) -> bool {
        matches!(
            self,
            StatementKind::Break
                | StatementKind::Continue
                | StatementKind::Return
                | StatementKind::Throw
        )
    }
}

/// Call node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallKind {
    MethodCall,
    /// `this(..)` / `super(..)`
    ConstructorCall,
    /// `new T(..)`
    InstanceCreation,
}

impl CallKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallKind::MethodCall => "METHOD_CALL",
            CallKind::ConstructorCall => "CONSTRUCTOR_CALL",
            CallKind::InstanceCreation => "INSTANCE_CREATION",
        }
    }
}

/// Parameter node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    FormalIn,
    FormalOut,
    ActualIn,
    ActualOut,
    /// Receiver object of an instance call
    Receiver,
}

impl ParameterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKind::FormalIn => "FORMAL_IN",
            ParameterKind::FormalOut => "FORMAL_OUT",
            ParameterKind::ActualIn => "ACTUAL_IN",
            ParameterKind::ActualOut => "ACTUAL_OUT",
            ParameterKind::Receiver => "METHOD_CALL_RECEIVER",
        }
    }

    pub fn is_formal(&self) -> bool {
        matches!(self, ParameterKind::FormalIn | ParameterKind::FormalOut)
    }

    /// Actual parameters including the receiver
    pub fn is_actual(&self) -> bool {
        !self.is_formal()
    }
}

/// Flattened kind of a CFG node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Entry(DeclKind),
    Exit(DeclKind),
    Statement(StatementKind),
    Call(CallKind),
    Parameter(ParameterKind),
    Merge,
    Dummy,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Entry(k) => write!(f, "{}_ENTRY", k.as_str()),
            NodeKind::Exit(k) => write!(f, "{}_EXIT", k.as_str()),
            NodeKind::Statement(k) => f.write_str(k.as_str()),
            NodeKind::Call(k) => f.write_str(k.as_str()),
            NodeKind::Parameter(k) => f.write_str(k.as_str()),
            NodeKind::Merge => f.write_str("MERGE"),
            NodeKind::Dummy => f.write_str("DUMMY"),
        }
    }
}

/// Control flow edge kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowKind {
    True,
    False,
    FallThrough,
    MethodCall,
    Parameter,
    ExceptionCatch,
    Undefined,
}

impl FlowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowKind::True => "TRUE",
            FlowKind::False => "FALSE",
            FlowKind::FallThrough => "FALL_THROUGH",
            FlowKind::MethodCall => "METHOD_CALL",
            FlowKind::Parameter => "PARAMETER",
            FlowKind::ExceptionCatch => "EXCEPTION_CATCH",
            FlowKind::Undefined => "UNDEFINED",
        }
    }

    /// Intraprocedural control transfer (everything except call and
    /// parameter linkage)
    pub fn is_control(&self) -> bool {
        !matches!(self, FlowKind::MethodCall | FlowKind::Parameter)
    }

    pub fn is_conditional(&self) -> bool {
        matches!(self, FlowKind::True | FlowKind::False)
    }
}
