use std::io::{self, Read};

use anyhow::{bail, Context, Result};

use mahjong_assist::api::{evaluate, EvaluateRequest};
use mahjong_assist::hand::Oracle;

// 打牌候補の評価モード
// 引数またはstdinでEvaluateRequest(JSON)を受け取り, 結果をJSONで出力
#[derive(Debug)]
pub struct CalculatorApp {
    exp: String,
    pretty: bool,
}

impl CalculatorApp {
    pub fn new(args: Vec<String>) -> Result<Self> {
        let mut app = Self {
            exp: "".to_string(),
            pretty: false,
        };
        for s in &args {
            match s.as_str() {
                "-d" => app.pretty = true,
                _ => {
                    if s.starts_with('-') {
                        bail!("unknown option: {}", s);
                    }
                    if !app.exp.is_empty() {
                        bail!("multiple expression is not allowed");
                    }
                    app.exp = s.clone();
                }
            }
        }
        Ok(app)
    }

    pub fn run(self) -> Result<()> {
        let exp = if self.exp.is_empty() {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
            buf
        } else {
            self.exp
        };

        let req: EvaluateRequest = serde_json::from_str(&exp).context("invalid request")?;
        let res = evaluate(&Oracle::default(), &req)?;
        let out = if self.pretty {
            serde_json::to_string_pretty(&res)?
        } else {
            serde_json::to_string(&res)?
        };
        println!("{}", out);
        Ok(())
    }
}
