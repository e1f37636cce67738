// Events go to the `pageview` target and vanish without `feature = "tracing"`.

#[cfg(feature = "tracing")]
macro_rules! pevent {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "pageview", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! pevent {
    ($level:ident, $($tt:tt)*) => {};
}

macro_rules! ptrace {
    ($($tt:tt)*) => { pevent!(trace, $($tt)*) };
}

macro_rules! pdebug {
    ($($tt:tt)*) => { pevent!(debug, $($tt)*) };
}

macro_rules! pwarn {
    ($($tt:tt)*) => { pevent!(warn, $($tt)*) };
}
