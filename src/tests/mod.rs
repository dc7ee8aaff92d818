mod script_tests;
