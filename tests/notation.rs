mod cases;

test_case!(frac, input: r"\frac{1}{2}", result: Ok("0.5"));
test_case!(dfrac, input: r"\dfrac{3}{4}", result: Ok("0.75"));
test_case!(nested_frac, input: r"\frac{1}{\frac{1}{4}}", result: Ok("4"));
test_case!(sqrt, input: r"\sqrt{4}", result: Ok("2"));
test_case!(nth_root, input: r"\sqrt[3]{27}", result: Ok("3"));
test_case!(latex_sin_with_parens, input: r"\sin(3.14)", result: Ok("0.001593"));
test_case!(latex_sin_with_left_right, input: r"\sin\left(0\right)", result: Ok("0"));
test_case!(latex_cos_without_parens, input: r"\cos 0", result: Ok("1"));
test_case!(cdot, input: r"2 \cdot 3", result: Ok("6"));
test_case!(times, input: r"2 \times 3", result: Ok("6"));
test_case!(div_command, input: r"6 \div 4", result: Ok("1.5"));
test_case!(unicode_operators, input: "10 ÷ 4 × 2", result: Ok("5"));
test_case!(implicit_multiplication, input: "3(2 + 1)", result: Ok("9"));
test_case!(implicit_constant, input: r"2\pi", result: Ok("6.283"));
test_case!(unicode_pi, input: "π", result: Ok("3.142"));
test_case!(left_right_parens, input: r"\left(1 + 2\right)^2", result: Ok("9"));
test_case!(braced_exponent, input: "2^{10}", result: Ok("1024"));
test_case!(latex_spacing, input: r"1 +\, 2 \quad", result: Ok("3"));
test_case!(trailing_equals, input: "2 + 2 =", result: Ok("4"));

test_case!(dangling_operator, input: "1 +", result: Err("Invalid expression"));
test_case!(unbalanced_parens, input: "(1 + 2", result: Err("Error: Invalid expression"));
test_case!(
    double_definition,
    input: "a := 1 := 2",
    result: Err("expected exactly one ':=', found 2"),
);
test_case!(
    definition_target_must_be_a_name,
    input: "2 := 3",
    result: Err("expected a single name, found '2'"),
);
test_case!(
    overflowing_literal,
    input: "1e400",
    result: Err("Error: Invalid expression: invalid number '1e400'"),
);
