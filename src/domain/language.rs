//! The two languages SharpCraft deals with: C# as input, Visual Basic as
//! translation output.

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    CSharp,
    VisualBasic,
}

/// Reserved words of Visual Basic. Identifiers that collide with one of
/// these (case-insensitively) must be written as `[name]`.
static VB_RESERVED_WORDS: &[&str] = &[
    "AddHandler", "AddressOf", "Alias", "And", "AndAlso", "As", "Boolean", "ByRef", "Byte",
    "ByVal", "Call", "Case", "Catch", "CBool", "CByte", "CChar", "CDate", "CDbl", "CDec",
    "Char", "CInt", "Class", "CLng", "CObj", "Const", "Continue", "CSByte", "CShort", "CSng",
    "CStr", "CType", "CUInt", "CULng", "CUShort", "Date", "Decimal", "Declare", "Default",
    "Delegate", "Dim", "DirectCast", "Do", "Double", "Each", "Else", "ElseIf", "End",
    "EndIf", "Enum", "Erase", "Error", "Event", "Exit", "False", "Finally", "For", "Friend",
    "Function", "Get", "GetType", "GetXMLNamespace", "Global", "GoSub", "GoTo", "Handles",
    "If", "Implements", "Imports", "In", "Inherits", "Integer", "Interface", "Is", "IsNot",
    "Let", "Lib", "Like", "Long", "Loop", "Me", "Mod", "Module", "MustInherit",
    "MustOverride", "MyBase", "MyClass", "Namespace", "Narrowing", "New", "Next", "Not",
    "Nothing", "NotInheritable", "NotOverridable", "Object", "Of", "On", "Operator",
    "Option", "Optional", "Or", "OrElse", "Overloads", "Overridable", "Overrides",
    "ParamArray", "Partial", "Private", "Property", "Protected", "Public", "RaiseEvent",
    "ReadOnly", "ReDim", "REM", "RemoveHandler", "Resume", "Return", "SByte", "Select",
    "Set", "Shadows", "Shared", "Short", "Single", "Static", "Step", "Stop", "String",
    "Structure", "Sub", "SyncLock", "Then", "Throw", "To", "True", "Try", "TryCast",
    "TypeOf", "UInteger", "ULong", "UShort", "Using", "Variant", "Wend", "When", "While",
    "Widening", "With", "WithEvents", "WriteOnly", "Xor",
];

impl Language {
    pub fn from_extension(ext: &str) -> Option<Language> {
        match ext.to_lowercase().as_str() {
            "cs" => Some(Language::CSharp),
            "vb" => Some(Language::VisualBasic),
            _ => None,
        }
    }

    /// Infer language from a file path.
    pub fn from_path(path: &Path) -> Option<Language> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Project file extension used by MSBuild for this language.
    pub fn project_extension(&self) -> &'static str {
        match self {
            Language::CSharp => "csproj",
            Language::VisualBasic => "vbproj",
        }
    }

    /// Whether `word` is reserved in this language and needs escaping when
    /// used as an identifier.
    pub fn is_reserved_word(&self, word: &str) -> bool {
        match self {
            Language::CSharp => crate::domain::syntax::SyntaxKind::from_keyword(word).is_some(),
            Language::VisualBasic => VB_RESERVED_WORDS.iter().any(|w| w.eq_ignore_ascii_case(word)),
        }
    }
}
