use std::io::{
    self,
    prelude::*,
    stdin,
    stdout
};
use rand::Rng;

pub trait IteratorExt: Iterator + Sized {
    fn rand<R: Rng + ?Sized>(self, rng: &mut R) -> Option<Self::Item> {
        let mut v = self.collect::<Vec<_>>();
        if v.is_empty() {
            None
        } else {
            let len = v.len();
            Some(v.swap_remove(rng.gen_range(0..len)))
        }
    }
}

impl<T: Iterator> IteratorExt for T {}

/// Prompts on stdout and reads one line from stdin, without the line ending. Returns `None` at end of input.
pub fn input(msg: &str) -> io::Result<Option<String>> {
    print!("[ ?? ] {}: ", msg);
    stdout().flush()?;
    let mut result = String::new();
    if stdin().read_line(&mut result)? == 0 {
        return Ok(None);
    }
    let trimmed = result.trim_end_matches(&['\r', '\n'][..]).len();
    result.truncate(trimmed);
    Ok(Some(result))
}
