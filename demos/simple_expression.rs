use log::debug;
use safecalc_rs::evaluate;

fn main() {
    pretty_env_logger::init();

    let expressions = [
        "2 + 3 * 4",
        "-2**2",
        "sin(pi / 2)",
        "sqrt(-1)",
        "1 / 0",
        "foo(1)",
        "(1 + 2",
    ];

    for expression in expressions {
        debug!("expression: {expression:?}");
        match evaluate(expression) {
            Ok(result) => println!("{} = {}", expression, result),
            Err(err) => println!("{} -> error: {}", expression, err),
        }
    }
}
