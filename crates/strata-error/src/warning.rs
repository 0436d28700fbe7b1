type WarningFunction = fn(&str, StrataWarning);
static mut WARNING_FUNCTION: Option<WarningFunction> = None;

/// Set the function that will be called by the `strata_warn!` macro.
/// You can use this to route warnings into a host language or a logger.
///
/// # Safety
/// The caller must ensure there is no other thread accessing this function
/// or calling `strata_warn!`.
pub unsafe fn set_warning_function(function: WarningFunction) {
    WARNING_FUNCTION = Some(function)
}

#[derive(Debug)]
pub enum StrataWarning {
    UserWarning,
    DeprecationWarning,
}

fn eprintln(fmt: &str, warning: StrataWarning) {
    eprintln!("{:?}: {}", warning, fmt);
}

pub fn get_warning_function() -> WarningFunction {
    unsafe { WARNING_FUNCTION.unwrap_or(eprintln) }
}

#[macro_export]
macro_rules! strata_warn {
    ($variant:ident, $fmt:literal $(, $arg:tt)*) => {
        {{
        let func = $crate::get_warning_function();
        let warn = $crate::StrataWarning::$variant;
        func(format!($fmt, $($arg)*).as_ref(), warn)
        }}
    };
    ($fmt:literal, $($arg:tt)+) => {
        {{
        let func = $crate::get_warning_function();
        func(format!($fmt, $($arg)+).as_ref(), $crate::StrataWarning::UserWarning)
        }}
    };
    ($($arg:tt)+) => {
        strata_warn!("{}", $($arg)+);
    };
}
