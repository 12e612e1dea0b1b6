pub mod d400_kanban_board;
