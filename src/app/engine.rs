use anyhow::{bail, Result};
use log::{debug, info};
use rand::prelude::*;

use mahjong_assist::actor::create_actors;
use mahjong_assist::control::{create_wall, MatchController, Stage};
use mahjong_assist::hand::Oracle;
use mahjong_assist::model::*;
use mahjong_assist::util::misc::*;

// [App]
// 全席AIの対局を繰り返して結果を集計する
#[derive(Debug)]
pub struct EngineApp {
    seed: u64,
    n_game: u32,
    call_probability: f64,
    quiet: bool,
}

impl EngineApp {
    pub fn new(args: Vec<String>) -> Result<Self> {
        let mut app = Self {
            seed: 0,
            n_game: 1,
            call_probability: 0.3,
            quiet: false,
        };

        let mut it = args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-s" => app.seed = next_value(&mut it, s)?,
                "-g" => app.n_game = next_value(&mut it, s)?,
                "-p" => app.call_probability = next_value(&mut it, s)?,
                "-q" => app.quiet = true,
                opt => bail!("unknown option: {}", opt),
            }
        }

        if app.seed == 0 {
            app.seed = unixtime_now() as u64;
            info!(
                "Random seed is not specified. Unix timestamp '{}' is used as seed.",
                app.seed
            );
        }

        Ok(app)
    }

    pub fn run(self) -> Result<()> {
        println!("seed: {}", self.seed);

        let oracle = Oracle::default();
        let mut rng: StdRng = SeedableRng::seed_from_u64(self.seed);
        let mut n_win = [0; SEAT];
        let mut n_draw = 0;
        let mut n_meld = 0;
        let start = std::time::Instant::now();
        for i in 0..self.n_game {
            let seed = rng.next_u64();
            let stg = Stage::new(create_wall(seed), WE, 25000);
            let mut ctrl = MatchController::new(stg, create_actors(seed, self.call_probability, None));
            ctrl.start(&oracle)?;
            ctrl.advance_until_human(&oracle)?;

            let stg = ctrl.stage();
            debug!("{}", stg);
            n_meld += stg.players.iter().map(|pl| pl.melds.len()).sum::<usize>();
            match stg.winner {
                Some(s) => n_win[s] += 1,
                None => n_draw += 1,
            }
            if !self.quiet {
                let result = match stg.winner {
                    Some(s) => format!("seat {} won", s),
                    None => "exhaustive draw".to_string(),
                };
                println!("game {:4} (seed: {:20}): {}, wall: {}", i, seed, result, stg.wall.len());
            }
        }

        println!("---------------------------------------------------------------------");
        println!("games: {}, draws: {}, melds: {}", self.n_game, n_draw, n_meld);
        for s in 0..SEAT {
            println!("seat {} wins: {}", s, n_win[s]);
        }
        println!(
            "total elapsed time: {:8.3}sec",
            start.elapsed().as_nanos() as f32 / 1000000000.0
        );
        Ok(())
    }
}
