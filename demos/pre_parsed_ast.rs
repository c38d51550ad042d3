use safecalc_rs::{Evaluator, EvaluatorConfig};

fn main() {
    pretty_env_logger::init();

    let evaluator = Evaluator::with_config(EvaluatorConfig { max_depth: 32 });

    let expression = "abs(cos(pi) * 3) ** 2";
    let ast = evaluator
        .parse_expression(expression)
        .expect("Failed to parse");
    println!("AST: {:#?}", ast);

    match evaluator.evaluate_ast(&ast) {
        Ok(result) => println!("Result: {}", result),
        Err(err) => println!("Error: {}", err),
    }
}
