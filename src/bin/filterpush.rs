use filterpush::catalog::r#type::Value;
use filterpush::config::Config;
use filterpush::error::{Error, Result};
use filterpush::filter::parser::{parse_filter, Lexer};

fn main() -> Result<()> {
    let args = clap::command!()
        .about("Inspect pushed down filter strings")
        .arg(
            clap::Arg::new("config")
                .short('c')
                .long("config")
                .help("Configuration file path")
                .default_value(""),
        )
        .subcommand_required(true)
        .subcommand(
            clap::Command::new("decode")
                .about("Print the tokens and the filter tree of a filter string")
                .arg(clap::Arg::new("filter").required(true)),
        )
        .subcommand(
            clap::Command::new("eval")
                .about("Evaluate a filter string against a single row")
                .arg(clap::Arg::new("filter").required(true))
                .arg(
                    clap::Arg::new("row")
                        .short('r')
                        .long("row")
                        .required(true)
                        .help("Comma separated column values, NULL for null"),
                ),
        )
        .get_matches();

    let file = args.get_one::<String>("config").map(String::as_str).unwrap_or_default();
    let cfg = Config::new(file)?;
    let loglevel = cfg.log_level.parse::<simplelog::LevelFilter>()?;
    simplelog::SimpleLogger::init(loglevel, simplelog::ConfigBuilder::new().build())?;

    match args.subcommand() {
        Some(("decode", sub)) => {
            let filter = required(sub, "filter")?;
            for token in Lexer::new(filter) {
                println!("{:?}", token?);
            }
            println!("{}", parse_filter(filter)?);
        }
        Some(("eval", sub)) => {
            let filter = parse_filter(required(sub, "filter")?)?;
            let row = parse_row(required(sub, "row")?);
            let ans = match filter.evaluate(&row)? {
                Some(true) => "TRUE",
                Some(false) => "FALSE",
                None => "NULL",
            };
            println!("{} => {}", filter, ans);
        }
        _ => return Err(Error::value("Unknown command")),
    }
    Ok(())
}

fn required<'a>(args: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| Error::value(format!("Missing argument {}", name)))
}

fn parse_row(row: &str) -> Vec<Value> {
    row.split(',')
        .map(|it| match it.trim() {
            "NULL" => Value::Null,
            "true" => Value::Boolean(true),
            "false" => Value::Boolean(false),
            s => s
                .parse::<i64>()
                .map(Value::Integer)
                .or_else(|_| s.parse::<f64>().map(Value::Float))
                .unwrap_or_else(|_| Value::String(s.to_string())),
        })
        .collect()
}
