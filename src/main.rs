fn main() {
    gunplay::game::run();
}
