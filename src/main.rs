//! refind 命令行工具
//!
//! 在文件或标准输入中执行正则查找/替换，
//! 退出码：0 有匹配，1 无匹配，2 参数或模式错误

use std::env;
use std::fs;
use std::io::Read;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use refind::{EolMode, RegexSearcher, SearchHit, SearchRequest};

struct CliOptions {
    pattern: String,
    file: Option<String>,
    replace: Option<String>,
    ignore_case: bool,
    whole_word: bool,
    word_start: bool,
    dot_all: bool,
    backward: bool,
    json: bool,
    eol_mode: EolMode,
}

impl CliOptions {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut pattern = None;
        let mut file = None;
        let mut replace = None;
        let mut ignore_case = false;
        let mut whole_word = false;
        let mut word_start = false;
        let mut dot_all = false;
        let mut backward = false;
        let mut json = false;
        let mut eol_mode = EolMode::Lf;

        let mut args = args;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-r" | "--replace" => {
                    replace = Some(args.next().ok_or("--replace needs a template")?);
                }
                "-i" | "--ignore-case" => ignore_case = true,
                "-w" | "--word" => whole_word = true,
                "--word-start" => word_start = true,
                "-s" | "--dot-all" => dot_all = true,
                "-b" | "--backward" => backward = true,
                "--json" => json = true,
                "--eol" => {
                    eol_mode = match args.next().as_deref() {
                        Some("lf") => EolMode::Lf,
                        Some("cr") => EolMode::Cr,
                        Some("crlf") => EolMode::CrLf,
                        _ => return Err("--eol expects lf, cr or crlf".to_owned()),
                    };
                }
                _ if arg.starts_with('-') && arg.len() > 1 => {
                    return Err(format!("unknown option: {}", arg));
                }
                _ if pattern.is_none() => pattern = Some(arg),
                _ if file.is_none() => file = Some(arg),
                _ => return Err(format!("unexpected argument: {}", arg)),
            }
        }

        Ok(Self {
            pattern: pattern.ok_or("missing pattern")?,
            file,
            replace,
            ignore_case,
            whole_word,
            word_start,
            dot_all,
            backward,
            json,
            eol_mode,
        })
    }
}

fn print_usage() {
    eprintln!(
        "usage: refind [options] <pattern> [file]\n\
         \n\
         reads the file (or stdin) and searches with editor regex syntax\n\
         \n\
         options:\n\
           -r, --replace <tmpl>  substitute matches, write result to stdout\n\
           -i, --ignore-case     case-insensitive search\n\
           -w, --word            whole-word search\n\
               --word-start      word-start search\n\
           -s, --dot-all         let . match line terminators\n\
           -b, --backward        report only the last match in the range\n\
               --eol <mode>      document eol mode: lf (default), cr, crlf\n\
               --json            print matches as JSON"
    );
}

fn read_input(file: Option<&str>) -> Result<String, String> {
    match file {
        Some(path) => fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e)),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("stdin: {}", e))?;
            Ok(buf)
        }
    }
}

fn print_hits(text: &str, hits: &[SearchHit], json: bool) -> Result<(), String> {
    if json {
        println!(
            "{}",
            serde_json::to_string(hits).map_err(|e| e.to_string())?
        );
    } else {
        for hit in hits {
            println!("{}..{}\t{}", hit.start, hit.end, &text[hit.start..hit.end]);
        }
    }
    Ok(())
}

fn run(opts: &CliOptions) -> Result<bool, String> {
    let text = read_input(opts.file.as_deref())?;
    let mut searcher = RegexSearcher::new();
    let base = SearchRequest {
        case_sensitive: !opts.ignore_case,
        whole_word: opts.whole_word,
        word_start: opts.word_start,
        dot_matches_newline: opts.dot_all,
        eol_mode: opts.eol_mode,
        ..SearchRequest::new(0, text.len())
    };

    if opts.backward {
        let req = SearchRequest {
            range_start: text.len(),
            range_end: 0,
            ..base
        };
        let hit = searcher
            .find(text.as_str(), &opts.pattern, &req)
            .map_err(|e| e.to_string())?;
        let Some(hit) = hit else { return Ok(false) };

        if let Some(template) = &opts.replace {
            let expanded = searcher
                .substitute(text.as_str(), template)
                .map_err(|e| e.to_string())?;
            print!("{}{}{}", &text[..hit.start], expanded, &text[hit.end..]);
        } else {
            print_hits(&text, &[hit], opts.json)?;
        }
        return Ok(true);
    }

    let mut hits = Vec::new();
    let mut replaced = opts.replace.as_ref().map(|_| String::with_capacity(text.len()));
    let mut cursor = 0;
    let mut from = 0;
    while from <= text.len() {
        let req = SearchRequest {
            range_start: from,
            range_end: text.len(),
            ..base
        };
        let hit = searcher
            .find(text.as_str(), &opts.pattern, &req)
            .map_err(|e| e.to_string())?;
        let Some(hit) = hit else { break };

        if let (Some(out), Some(template)) = (replaced.as_mut(), opts.replace.as_ref()) {
            let expanded = searcher
                .substitute(text.as_str(), template)
                .map_err(|e| e.to_string())?;
            out.push_str(&text[cursor..hit.start]);
            out.push_str(&expanded);
            cursor = hit.end;
        }
        hits.push(hit);

        // 零长度命中也要推进，且不能停在多字节字符内部
        from = hit.start + hit.len().max(1);
        while from < text.len() && !text.is_char_boundary(from) {
            from += 1;
        }
    }

    if let Some(mut out) = replaced {
        out.push_str(&text[cursor..]);
        print!("{}", out);
    } else {
        print_hits(&text, &hits, opts.json)?;
    }
    Ok(!hits.is_empty())
}

fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("refind=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let opts = match CliOptions::parse(args.into_iter()) {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("refind: {}", msg);
            print_usage();
            return ExitCode::from(2);
        }
    };

    match run(&opts) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(msg) => {
            eprintln!("refind: {}", msg);
            ExitCode::from(2)
        }
    }
}
