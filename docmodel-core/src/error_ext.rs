use std::error::Error;

use crate::location::Location;

pub enum NextError<'a> {
    Ext(&'a dyn ErrorExt),
    Std(&'a dyn Error),
    None,
}

/// An error that knows where it was raised and what caused it.
pub trait ErrorExt: Error {
    fn entry(&self) -> (Location, NextError<'_>);

    /// Renders the chain of causes, outermost first, as `"<idx>: <error>, at <location>"` lines.
    fn error_stack(&self) -> Box<[Box<str>]> {
        let mut stack = Vec::new();

        let (location, mut next_error) = self.entry();
        stack.push(format!("0: {self}, at {location}").into_boxed_str());

        loop {
            let idx = stack.len();

            match next_error {
                NextError::Ext(e) => {
                    let (location, next) = e.entry();
                    stack.push(format!("{idx}: {e}, at {location}").into_boxed_str());
                    next_error = next;
                }
                NextError::Std(e) => {
                    stack.push(format!("{idx}: {e}").into_boxed_str());
                    break;
                }
                NextError::None => break,
            }
        }

        stack.into_boxed_slice()
    }
}
