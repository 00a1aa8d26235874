use std::io::Write;

pub fn read_stdin_buf<P>(prompt: P, buffer: &mut String) -> std::io::Result<usize>
where
    P: AsRef<str>
{
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    stdout.write_all(prompt.as_ref().as_bytes())?;
    stdout.flush()?;

    stdin.read_line(buffer)
}

/// reads a line from stdin. `None` once stdin has been closed
pub fn read_stdin<P>(prompt: P) -> std::io::Result<Option<String>>
where
    P: AsRef<str>
{
    let mut buffer = String::new();

    if read_stdin_buf(prompt, &mut buffer)? == 0 {
        return Ok(None);
    }

    Ok(Some(buffer))
}

pub fn read_stdin_trimmed<P>(prompt: P) -> std::io::Result<String>
where
    P: AsRef<str>
{
    let given = read_stdin(prompt)?.unwrap_or_default();

    Ok(given.trim().to_owned())
}

pub fn read_yn<P>(prefix: P) -> std::io::Result<bool>
where
    P: std::fmt::Display
{
    let prompt = format!("{} [y|n]: ", prefix);
    let result = read_stdin_trimmed(prompt)?;

    Ok(result.chars()
        .next()
        .map(|first| first.to_ascii_lowercase() == 'y')
        .unwrap_or(false))
}

/// runs a blocking prompt off of the async runtime
pub async fn prompt<F, T>(func: F) -> crate::error::Result<T>
where
    F: FnOnce() -> std::io::Result<T> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(func).await??)
}
