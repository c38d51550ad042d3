use safecalc_rs::evaluate_batch;

fn main() {
    pretty_env_logger::init();

    let expressions = ["10 // 3", "10 % 3", "2 ** 0.5", "log(0)", "exp(1) - e"];

    for (i, result) in evaluate_batch(&expressions).iter().enumerate() {
        println!("Result {} ({}): {:?}", i, expressions[i], result);
    }
}
