// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Courier CLI - send one configured request and print the result

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use courier::{HttpClient, RequestBuilder};
use reqwest::header::HeaderMap;
use reqwest::Method;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("courier=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        None | Some("--help" | "-h" | "help") => {
            print_usage();
            if args.is_empty() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Some("--version" | "-v" | "version") => {
            println!("courier {}", courier::VERSION);
            ExitCode::SUCCESS
        }
        Some(_) => match Invocation::parse(&args) {
            Ok(invocation) => match run(invocation).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {:#}", e);
                    ExitCode::from(1)
                }
            },
            Err(e) => {
                eprintln!("Error: {:#}", e);
                print_usage();
                ExitCode::from(1)
            }
        },
    }
}

fn print_usage() {
    println!(
        r#"Courier - send a single configured HTTP request

USAGE:
    courier <METHOD> <URL> [OPTIONS]

METHODS:
    get, head, delete, post, put, patch

OPTIONS:
    -H <NAME:VALUE>          Add a request header (repeatable)
    -q <KEY=VALUE>           Add a query parameter (repeatable)
    --allow-any              Accept every status code
    --allow-status <CODE>    Accept only this status code
    --allow-range <MIN-MAX>  Accept an inclusive status range
    --bearer <TOKEN>         Bearer authentication
    --basic <USER:PASS>      Basic authentication
    --timeout <SECS>         Request timeout in seconds
    --data <BODY>            Request body
    --headers                Print response headers
    -h, --help               Print help
    -v, --version            Print version

ENVIRONMENT:
    RUST_LOG                 Log filter (default: courier=info)
"#
    );
}

#[derive(Debug, Clone, PartialEq)]
enum StatusOption {
    Default,
    Any,
    Specific(u16),
    Range(u16, u16),
}

#[derive(Debug, Clone, PartialEq)]
enum AuthOption {
    Bearer(String),
    Basic(String, String),
}

/// Parsed command line
#[derive(Debug)]
struct Invocation {
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    status: StatusOption,
    auth: Option<AuthOption>,
    timeout: Option<Duration>,
    body: Option<String>,
    show_headers: bool,
}

impl Invocation {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut iter = args.iter();
        let method = match iter.next().map(|m| m.to_ascii_lowercase()).as_deref() {
            Some("get") => Method::GET,
            Some("head") => Method::HEAD,
            Some("delete") => Method::DELETE,
            Some("post") => Method::POST,
            Some("put") => Method::PUT,
            Some("patch") => Method::PATCH,
            Some(other) => bail!("unknown method '{}'", other),
            None => bail!("missing method"),
        };
        let url = iter.next().context("missing URL")?.clone();

        let mut invocation = Invocation {
            method,
            url,
            headers: Vec::new(),
            query: Vec::new(),
            status: StatusOption::Default,
            auth: None,
            timeout: None,
            body: None,
            show_headers: false,
        };

        while let Some(flag) = iter.next() {
            let mut value = || {
                iter.next()
                    .map(String::as_str)
                    .ok_or_else(|| anyhow!("{} needs a value", flag))
            };
            match flag.as_str() {
                "-H" => invocation.headers.push(split_pair(value()?, ':')?),
                "-q" => invocation.query.push(split_pair(value()?, '=')?),
                "--allow-any" => invocation.status = StatusOption::Any,
                "--allow-status" => {
                    let code = value()?;
                    invocation.status = StatusOption::Specific(
                        code.parse()
                            .with_context(|| format!("invalid status '{}'", code))?,
                    );
                }
                "--allow-range" => {
                    let (min, max) = split_pair(value()?, '-')?;
                    invocation.status = StatusOption::Range(
                        min.parse().with_context(|| format!("invalid status '{}'", min))?,
                        max.parse().with_context(|| format!("invalid status '{}'", max))?,
                    );
                }
                "--bearer" => invocation.auth = Some(AuthOption::Bearer(value()?.to_string())),
                "--basic" => {
                    let (user, pass) = split_pair(value()?, ':')?;
                    invocation.auth = Some(AuthOption::Basic(user, pass));
                }
                "--timeout" => {
                    let secs = value()?;
                    let secs: f64 = secs
                        .parse()
                        .with_context(|| format!("invalid timeout '{}'", secs))?;
                    invocation.timeout = Some(
                        Duration::try_from_secs_f64(secs)
                            .with_context(|| format!("invalid timeout '{}'", secs))?,
                    );
                }
                "--data" => invocation.body = Some(value()?.to_string()),
                "--headers" => invocation.show_headers = true,
                other => bail!("unknown option '{}'", other),
            }
        }

        Ok(invocation)
    }

    /// Apply every option to `builder`
    fn configure<'a>(
        &self,
        mut builder: RequestBuilder<'a>,
    ) -> courier::Result<RequestBuilder<'a>> {
        for (name, value) in &self.headers {
            builder = builder.add_header(name, value)?;
        }
        for (key, value) in &self.query {
            builder = builder.add_query_parameter(key, value.as_str())?;
        }
        builder = match self.status {
            StatusOption::Default => builder,
            StatusOption::Any => builder.allow_any_status_code(),
            StatusOption::Specific(code) => builder.allow_specific_status_code(code)?,
            StatusOption::Range(min, max) => builder.allow_status_range(min, max)?,
        };
        builder = match &self.auth {
            None => builder,
            Some(AuthOption::Bearer(token)) => builder.with_oauth_bearer(token)?,
            Some(AuthOption::Basic(user, pass)) => builder.with_basic_authentication(user, pass)?,
        };
        if let Some(timeout) = self.timeout {
            builder = builder.with_timeout(timeout)?;
        }
        if let Some(ref body) = self.body {
            builder = builder.body(body.clone());
        }
        Ok(builder)
    }
}

fn split_pair(raw: &str, separator: char) -> anyhow::Result<(String, String)> {
    let (left, right) = raw
        .split_once(separator)
        .ok_or_else(|| anyhow!("expected '{}' in '{}'", separator, raw))?;
    Ok((left.trim().to_string(), right.trim().to_string()))
}

async fn run(invocation: Invocation) -> anyhow::Result<()> {
    let client = HttpClient::new().context("failed to create HTTP client")?;
    let mut headers = HeaderMap::new();

    let builder = client.request(invocation.method.clone(), &invocation.url)?;
    let result = invocation
        .configure(builder)?
        .fill_response_headers(&mut headers)
        .send()
        .await;

    let response = match result {
        Ok(response) => response,
        Err(courier::Error::UnexpectedStatus(response)) => {
            print_response_headers(&invocation, &headers);
            eprintln!("{}", response.text_lossy());
            bail!("status {} was not accepted", response.status);
        }
        Err(e) => return Err(e.into()),
    };

    println!("{} {}", response.status, response.url_str());
    print_response_headers(&invocation, &headers);
    println!();
    println!("{}", response.text_lossy());
    Ok(())
}

fn print_response_headers(invocation: &Invocation, headers: &HeaderMap) {
    if !invocation.show_headers {
        return;
    }
    for (name, value) in headers {
        println!("{}: {}", name, String::from_utf8_lossy(value.as_bytes()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier::StatusPolicy;
    use reqwest::StatusCode;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_full_invocation() {
        let invocation = Invocation::parse(&args(&[
            "POST",
            "https://example.com/items",
            "-H",
            "Accept: application/json",
            "-q",
            "page=2",
            "--allow-range",
            "200-204",
            "--basic",
            "alice:secret",
            "--timeout",
            "2.5",
            "--data",
            "{}",
            "--headers",
        ]))
        .unwrap();

        assert_eq!(invocation.method, Method::POST);
        assert_eq!(
            invocation.headers,
            vec![("Accept".to_string(), "application/json".to_string())]
        );
        assert_eq!(invocation.query, vec![("page".to_string(), "2".to_string())]);
        assert_eq!(invocation.status, StatusOption::Range(200, 204));
        assert_eq!(
            invocation.auth,
            Some(AuthOption::Basic("alice".to_string(), "secret".to_string()))
        );
        assert_eq!(invocation.timeout, Some(Duration::from_millis(2500)));
        assert!(invocation.show_headers);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Invocation::parse(&args(&["fetch", "https://example.com"])).is_err());
        assert!(Invocation::parse(&args(&["get"])).is_err());
        assert!(Invocation::parse(&args(&["get", "https://example.com", "-H"])).is_err());
        assert!(Invocation::parse(&args(&["get", "https://example.com", "-q", "novalue"])).is_err());
        assert!(Invocation::parse(&args(&["get", "https://example.com", "--timeout", "-1"])).is_err());
        assert!(Invocation::parse(&args(&["get", "https://example.com", "--bogus"])).is_err());
    }

    #[test]
    fn test_configure_applies_options() {
        let client = HttpClient::new().unwrap();
        let invocation = Invocation::parse(&args(&[
            "get",
            "https://example.com/items",
            "-q",
            "q=rust",
            "--allow-status",
            "201",
            "--bearer",
            "tok",
        ]))
        .unwrap();

        let builder = invocation
            .configure(client.request(Method::GET, &invocation.url).unwrap())
            .unwrap();
        assert_eq!(
            builder.status_policy(),
            StatusPolicy::Specific(StatusCode::CREATED)
        );
        let request = builder.build();
        assert_eq!(request.full_url().as_str(), "https://example.com/items?q=rust");
        assert_eq!(request.auth, Some(courier::Auth::Bearer("tok".to_string())));
    }

    #[test]
    fn test_configure_rejects_zero_timeout() {
        let client = HttpClient::new().unwrap();
        let invocation =
            Invocation::parse(&args(&["get", "https://example.com", "--timeout", "0"])).unwrap();
        let err = invocation
            .configure(client.get(&invocation.url).unwrap())
            .unwrap_err();
        assert!(err.is_validation());
    }
}
