use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use log::{debug, info};

use mahjong_assist::api::{Request, Response, Session};
use mahjong_assist::control::MatchConfig;
use mahjong_assist::util::misc::*;

// 1行1要求のJSONをstdinから読み込み, 応答を1行ずつstdoutに出力
#[derive(Debug)]
pub struct SessionApp {
    config: MatchConfig,
}

impl SessionApp {
    pub fn new(args: Vec<String>) -> Result<Self> {
        let mut config = MatchConfig::default();
        let mut it = args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-s" => config.seed = next_value(&mut it, s)?,
                "-p" => config.call_probability = next_value(&mut it, s)?,
                "-h" => {
                    let v: String = next_value(&mut it, s)?;
                    config.human_seat = if v == "none" { None } else { Some(v.parse()?) };
                }
                "-c" => {
                    let path: String = next_value(&mut it, s)?;
                    config = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
                }
                opt => bail!("unknown option: {}", opt),
            }
        }

        if config.seed == 0 {
            config.seed = unixtime_now() as u64;
            info!(
                "Random seed is not specified. Unix timestamp '{}' is used as seed.",
                config.seed
            );
        }

        Ok(Self { config })
    }

    pub fn run(self) -> Result<()> {
        let mut session = Session::new(self.config)?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for line in io::stdin().lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            debug!("request: {}", line);
            let res = match serde_json::from_str::<Request>(&line) {
                Ok(req) => session.handle(req),
                Err(e) => Response::Error(e.to_string()),
            };
            writeln!(out, "{}", serde_json::to_string(&res)?)?;
            out.flush()?;
        }
        Ok(())
    }
}
