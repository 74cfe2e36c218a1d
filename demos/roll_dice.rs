use dice_notation::DiceExpression;

// cargo run --example roll_dice -- 3d6 d20+5 2d4-1
fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let inputs = if args.is_empty() {
        vec!["2d6".to_owned(), "d20".to_owned(), "1d4-1".to_owned()]
    } else {
        args
    };

    for input in inputs {
        match DiceExpression::parse(&input) {
            Ok(dice) => {
                let rolls = dice.roll_multiple(5);
                println!(
                    "{dice} ({}..={}): rolled {:?}",
                    dice.min_roll(),
                    dice.max_roll(),
                    rolls
                );
            }
            Err(err) => println!("{input}: {err}"),
        }
    }
}
