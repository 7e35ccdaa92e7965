mod decode;
mod session;
mod sources;
