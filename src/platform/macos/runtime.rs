// ── Objective-C runtime surface ───────────────────────────────────────────────
//
// Methods are called by selector name with arguments from a small closed set
// (`Arg`) and results reinterpreted as one of a few return kinds
// (`ReturnKind`).  `ObjcRuntime` is implemented by the real bridge on macOS
// and by recording fakes in tests.

use std::str::FromStr;

use thiserror::Error;

use crate::handle::NativeHandle;

/// An Objective-C object, class or `nil`.
pub type Id = NativeHandle;

/// Placeholder text `from_ns_string` yields for a `nil` string.
pub const NIL_STRING: &str = "<nil>";

// ── Arguments ─────────────────────────────────────────────────────────────────

/// One positional message argument.
///
/// All variants are passed in general-purpose registers on the supported
/// ABIs (x86_64, arm64), which is what lets the bridge lower them uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg {
    Object(Id),
    Bool(bool),
    Int(isize),
    UInt(usize),
}

impl Arg {
    /// `nil` as an object argument.
    pub const NIL: Self = Self::Object(NativeHandle::NULL);

    /// The argument as a machine word.
    pub fn to_word(self) -> usize {
        match self {
            Self::Object(id) => id.as_raw() as usize,
            Self::Bool(b) => usize::from(b),
            Self::Int(i) => i as usize,
            Self::UInt(u) => u,
        }
    }
}

impl From<Id> for Arg {
    fn from(id: Id) -> Self {
        Self::Object(id)
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

// ── Return kinds ──────────────────────────────────────────────────────────────

/// How the raw result of a message send is reinterpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnKind {
    Void,
    /// `id` / any object pointer.
    #[default]
    Object,
    /// `BOOL`
    Bool,
    /// `NSInteger`
    Int,
    /// `NSUInteger`
    UInt,
    /// `double` / `CGFloat`
    Double,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown return kind `{0}`")]
pub struct UnknownReturnKind(pub String);

impl FromStr for ReturnKind {
    type Err = UnknownReturnKind;

    /// Accepts Objective-C, C and Rust spellings of the supported types.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(match name {
            "void" | "()" => Self::Void,
            "id" | "object" | "pointer" | "void*" | "c_void_p" => Self::Object,
            "BOOL" | "bool" | "c_bool" => Self::Bool,
            "NSInteger" | "int" | "long" | "c_long" | "isize" => Self::Int,
            "NSUInteger" | "uint" | "ulong" | "c_ulong" | "usize" => Self::UInt,
            "double" | "CGFloat" | "c_double" | "f64" => Self::Double,
            other => return Err(UnknownReturnKind(other.to_owned())),
        })
    }
}

// ── Results ───────────────────────────────────────────────────────────────────

/// A message-send result, tagged with the requested [`ReturnKind`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Void,
    Object(Id),
    Bool(bool),
    Int(isize),
    UInt(usize),
    Double(f64),
}

impl Value {
    /// The all-zero result of kind `ret`, returned when a message is not
    /// sent.
    pub fn zero(ret: ReturnKind) -> Self {
        match ret {
            ReturnKind::Void => Self::Void,
            ReturnKind::Object => Self::Object(NativeHandle::NULL),
            ReturnKind::Bool => Self::Bool(false),
            ReturnKind::Int => Self::Int(0),
            ReturnKind::UInt => Self::UInt(0),
            ReturnKind::Double => Self::Double(0.0),
        }
    }

    /// The object result, or `nil` for any other kind.
    pub fn as_object(self) -> Id {
        match self {
            Self::Object(id) => id,
            _ => NativeHandle::NULL,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_uint(self) -> Option<usize> {
        match self {
            Self::UInt(u) => Some(u),
            _ => None,
        }
    }
}

// ── Runtime surface ───────────────────────────────────────────────────────────

/// Dynamic access to Objective-C classes, selectors and methods.
pub trait ObjcRuntime {
    /// Look a class up by name; `nil` if the runtime does not know it.
    fn class(&self, name: &str) -> Id;

    /// Whether instances of `class` respond to `selector`.
    fn responds_to(&self, class: Id, selector: &str) -> bool;

    /// Send `method` to `receiver` with positional `args`.
    ///
    /// No signature check is possible: the caller must match the real
    /// method signature, exactly as with `objc_msgSend` itself.
    ///
    /// Implementations may cap the number of arguments (the macOS bridge
    /// sends at most six).  Past the cap nothing is sent and
    /// `Value::zero(ret)` is returned.
    fn call(&self, receiver: Id, method: &str, args: &[Arg], ret: ReturnKind) -> Value;

    /// Create a new (+1 retained) `NSString` from UTF-8 text.
    fn to_ns_string(&self, text: &str) -> Id;

    /// Decode an `NSString` as UTF-8.
    ///
    /// `nil` yields [`NIL_STRING`]; a failed conversion yields `None`.
    fn from_ns_string(&self, string: Id) -> Option<String>;

    /// `call` with an object result.
    fn send(&self, receiver: Id, method: &str, args: &[Arg]) -> Id {
        self.call(receiver, method, args, ReturnKind::Object).as_object()
    }

    /// `[[class alloc] init]`
    fn new_object(&self, class: Id) -> Id {
        let obj = self.send(class, "alloc", &[]);
        self.send(obj, "init", &[])
    }

    /// `responds_to` with the class given by name.
    fn class_responds_to(&self, class_name: &str, selector: &str) -> bool {
        self.responds_to(self.class(class_name), selector)
    }
}

impl<R: ObjcRuntime + ?Sized> ObjcRuntime for &R {
    fn class(&self, name: &str) -> Id {
        (**self).class(name)
    }

    fn responds_to(&self, class: Id, selector: &str) -> bool {
        (**self).responds_to(class, selector)
    }

    fn call(&self, receiver: Id, method: &str, args: &[Arg], ret: ReturnKind) -> Value {
        (**self).call(receiver, method, args, ret)
    }

    fn to_ns_string(&self, text: &str) -> Id {
        (**self).to_ns_string(text)
    }

    fn from_ns_string(&self, string: Id) -> Option<String> {
        (**self).from_ns_string(string)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("id", ReturnKind::Object)]
    #[case("c_void_p", ReturnKind::Object)]
    #[case("BOOL", ReturnKind::Bool)]
    #[case("c_bool", ReturnKind::Bool)]
    #[case("NSUInteger", ReturnKind::UInt)]
    #[case("long", ReturnKind::Int)]
    #[case("CGFloat", ReturnKind::Double)]
    #[case("void", ReturnKind::Void)]
    fn return_kind_names(#[case] name: &str, #[case] kind: ReturnKind) {
        assert_eq!(name.parse::<ReturnKind>(), Ok(kind));
    }

    #[test]
    fn unknown_return_kind_is_rejected() {
        let err = "NSRect".parse::<ReturnKind>().expect_err("struct returns are unsupported");
        assert_eq!(err.to_string(), "unknown return kind `NSRect`");
    }

    #[test]
    fn default_return_kind_is_object() {
        assert_eq!(ReturnKind::default(), ReturnKind::Object);
    }

    #[test]
    fn args_lower_to_words() {
        assert_eq!(Arg::NIL.to_word(), 0);
        assert_eq!(Arg::Bool(true).to_word(), 1);
        assert_eq!(Arg::Bool(false).to_word(), 0);
        assert_eq!(Arg::Int(-1).to_word(), usize::MAX);
        assert_eq!(Arg::from(NativeHandle::from_addr(0x40)).to_word(), 0x40);
    }

    #[rstest]
    #[case(ReturnKind::Void, Value::Void)]
    #[case(ReturnKind::Object, Value::Object(NativeHandle::NULL))]
    #[case(ReturnKind::Bool, Value::Bool(false))]
    #[case(ReturnKind::Int, Value::Int(0))]
    #[case(ReturnKind::UInt, Value::UInt(0))]
    #[case(ReturnKind::Double, Value::Double(0.0))]
    fn zero_value_per_kind(#[case] kind: ReturnKind, #[case] zero: Value) {
        assert_eq!(Value::zero(kind), zero);
    }

    #[test]
    fn value_accessors() {
        let id = NativeHandle::from_addr(0x80);
        assert_eq!(Value::Object(id).as_object(), id);
        assert!(Value::Bool(true).as_object().is_null());
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::UInt(4).as_uint(), Some(4));
        assert_eq!(Value::Void.as_uint(), None);
    }
}
