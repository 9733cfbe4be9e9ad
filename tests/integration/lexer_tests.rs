// Tokenizer integration suite. Categories live under lexer/.
mod lexer;
