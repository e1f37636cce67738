// Coordinator events use their own target so hosts can filter them apart from the engine.

#[cfg(feature = "tracing")]
macro_rules! cevent {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "pageview_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! cevent {
    ($level:ident, $($tt:tt)*) => {};
}

macro_rules! ctrace {
    ($($tt:tt)*) => { cevent!(trace, $($tt)*) };
}

macro_rules! cdebug {
    ($($tt:tt)*) => { cevent!(debug, $($tt)*) };
}
