//! Default argument lists for undocumented operator-style members.

use crate::classify::is_dunder;

/// Fully generic argument list.
pub const GENERIC_ARGS: &str = "*args, **kwargs";

const NO_ARGS: &[&str] = &[
    "hash",
    "iter",
    "next",
    "sizeof",
    "copy",
    "deepcopy",
    "reduce",
    "getinitargs",
    "int",
    "float",
    "trunc",
    "complex",
    "bool",
    "getstate",
    "neg",
    "pos",
];

const BINARY: &[&str] = &[
    "eq", "ne", "lt", "le", "gt", "ge", "add", "radd", "sub", "rsub", "mul", "rmul", "mod",
    "rmod", "floordiv", "rfloordiv", "truediv", "rtruediv", "divmod", "rdivmod", "pow", "rpow",
];

/// Argument list (without parentheses) for a class member with no usable
/// documentation.
pub fn method_args(name: &str) -> &'static str {
    if !is_dunder(name) {
        return GENERIC_ARGS;
    }
    let core = &name[2..name.len() - 2];

    if NO_ARGS.contains(&core) {
        return "";
    }
    if BINARY.contains(&core) {
        return "other";
    }
    match core {
        "getitem" => "index",
        "setitem" => "index, object",
        "getattr" | "delattr" => "name",
        "setattr" => "name, value",
        "setstate" => "state",
        _ => GENERIC_ARGS,
    }
}
