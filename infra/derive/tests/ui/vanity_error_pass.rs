use std::borrow::Cow;
use vanity_derive::vanity_error;

#[vanity_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let err: DemoError = "boom".into();
    assert_eq!(err.kind(), "Internal");

    let io = DemoError::from(std::io::Error::other("disk"));
    assert_eq!(io.kind(), "Io");
}
